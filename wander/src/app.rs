use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use wander_api::{ApiClient, Method, Request};
use wander_auth::{
    spawn_refresh_loop, AuthClient, CredentialStore, FileCredentialStore, TokenManager,
};

use crate::cli::Command;
use crate::navigator::TerminalNavigator;
use crate::overlay::spawn_terminal_overlay;
use crate::settings::Settings;

pub struct App {
    auth: Arc<AuthClient>,
    tokens: Arc<TokenManager>,
    client: ApiClient,
    refresh_interval: std::time::Duration,
}

impl App {
    pub fn new(settings: &Settings) -> Result<Self> {
        let store: Arc<dyn CredentialStore> = match &settings.storage.dir {
            Some(dir) => Arc::new(FileCredentialStore::in_dir(dir)?),
            None => Arc::new(FileCredentialStore::new()?),
        };
        Self::with_store(settings, store)
    }

    pub fn with_store(settings: &Settings, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let auth = Arc::new(AuthClient::new(&settings.auth)?);
        let tokens = Arc::new(
            TokenManager::new(store, auth.clone(), Arc::new(TerminalNavigator))
                .with_refresh_threshold(settings.auth.refresh_threshold()),
        );
        let client = ApiClient::from_settings(&settings.api, tokens.clone())?;

        Ok(Self {
            auth,
            tokens,
            client,
            refresh_interval: settings.auth.refresh_interval(),
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// Run a command and return the text to print
    pub async fn run(&self, command: Command) -> Result<String> {
        // Session commands write the store themselves and never need a refreshed token
        let _refresh = match command {
            Command::Login { .. } | Command::Logout | Command::Status => None,
            _ => Some(spawn_refresh_loop(self.tokens.clone(), self.refresh_interval)),
        };
        let _overlay = spawn_terminal_overlay(self.client.subscribe_loading());

        tracing::info!(command = ?command, "Running command");

        match command {
            Command::Login { code } => self.login(code).await,
            Command::Logout => {
                self.tokens.logout().await?;
                Ok("Signed out.".to_string())
            }
            Command::Status => self.status(),
            Command::Get { path } => {
                let body = self.client.execute(Method::GET, &path, None).await?;
                render(&body)
            }
            Command::Trips { keyword, page } => {
                let mut request = Request::trips().list();
                if let Some(keyword) = keyword {
                    request = request.keyword(keyword);
                }
                if let Some(page) = page {
                    request = request.page(page);
                }
                render(&self.client.send(request).await?.into_data()?)
            }
            Command::Trip { id } => {
                render(&self.client.send(Request::trips().get(id)).await?.into_data()?)
            }
            Command::Posts { page } => {
                let mut request = Request::posts().list();
                if let Some(page) = page {
                    request = request.page(page);
                }
                render(&self.client.send(request).await?.into_data()?)
            }
            Command::Post { id } => {
                let post = self.client.send(Request::posts().get(id)).await?;
                let comments = self
                    .client
                    .send(Request::posts().comments(id).list())
                    .await?;
                render(&serde_json::json!({
                    "post": post.into_data()?,
                    "comments": comments.data.unwrap_or_default(),
                }))
            }
            Command::Comment { post_id, content } => {
                let request = Request::posts().comments(post_id).create(content);
                render(&self.client.send(request).await?.into_data()?)
            }
            Command::Chats => render(&self.client.send(Request::chats().list()).await?.into_data()?),
            Command::Me => render(&self.client.send(Request::users().me()).await?.into_data()?),
            Command::Settlements => render(
                &self
                    .client
                    .send(Request::users().settlement_accounts())
                    .await?
                    .into_data()?,
            ),
        }
    }

    async fn login(&self, code: Option<String>) -> Result<String> {
        let code = match code {
            Some(code) => code,
            None => self.prompt_for_code().await?,
        };

        let user = self
            .tokens
            .login(code.trim())
            .await
            .context("Could not sign in with that code")?;

        Ok(match user.and_then(|u| u.nickname) {
            Some(nickname) => format!("Signed in as {}.", nickname),
            None => "Signed in.".to_string(),
        })
    }

    async fn prompt_for_code(&self) -> Result<String> {
        let url = self.auth.authorization_url()?;

        if let Err(e) = open::that(url) {
            eprintln!("Failed to open browser automatically: {}", e);
            eprintln!("\nPlease open this URL in your browser:");
        } else {
            eprintln!("Browser opened. Please authorize the application.");
            eprintln!("\nYou can also open this URL directly:");
        }
        eprintln!("{}\n", url);
        eprintln!("Paste the code from the redirect page, then press Enter:");

        let input = tokio::task::spawn_blocking(|| {
            let mut input = String::new();
            std::io::stdin().read_line(&mut input).map(|_| input)
        })
        .await??;
        let code = input.trim().to_string();
        if code.is_empty() {
            anyhow::bail!("No authorization code entered");
        }
        Ok(code)
    }

    fn status(&self) -> Result<String> {
        if !self.tokens.is_authenticated()? {
            return Ok("Not signed in.".to_string());
        }

        let mut lines = Vec::new();
        match self.tokens.user()?.and_then(|u| u.nickname) {
            Some(nickname) => lines.push(format!("Signed in as {}", nickname)),
            None => lines.push("Signed in".to_string()),
        }
        match self.tokens.token_expiry() {
            Ok(Some(expiry)) => lines.push(format!(
                "Access token expires at {}",
                expiry.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S")
            )),
            Ok(None) => {}
            Err(e) => lines.push(format!("Access token expiry unknown ({})", e)),
        }
        Ok(lines.join("\n"))
    }
}

fn render<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
