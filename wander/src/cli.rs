use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "wander", version, about = "Trips, posts and chats from the terminal")]
pub struct Cli {
    /// Also print logs to stderr
    #[arg(short, long, global = true, env = "WANDER_VERBOSE")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Sign in with an OAuth authorization code
    Login {
        /// Code returned by the provider; prompts for it when omitted
        #[arg(long)]
        code: Option<String>,
    },
    /// Forget stored credentials
    Logout,
    /// Show the current session
    Status,
    /// Authenticated GET against any API path
    Get { path: String },
    /// Browse trips
    Trips {
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show one trip
    Trip { id: i64 },
    /// Browse community posts
    Posts {
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show one post with its comments
    Post { id: i64 },
    /// Comment on a post
    Comment { post_id: i64, content: String },
    /// List chat rooms
    Chats,
    /// Show your profile
    Me,
    /// List settlement accounts
    Settlements,
}
