use wander_auth::{Navigator, LOGIN_ROUTE};

/// Sends the user back to `wander login` when their session ends
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect(&self, route: &str) {
        tracing::warn!(route = %route, "Session ended");
        if route == LOGIN_ROUTE {
            eprintln!("\nYour session has expired. Run `wander login` to sign in again.");
        } else {
            eprintln!("\nContinue at {}", route);
        }
    }
}
