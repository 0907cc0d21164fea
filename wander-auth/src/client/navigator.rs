/// Route the user is sent to once their session cannot be recovered
pub const LOGIN_ROUTE: &str = "/login";

/// Moves the user interface to another route.
///
/// The token manager only ever asks for [`LOGIN_ROUTE`], after it has
/// cleared the stored credentials.
pub trait Navigator: Send + Sync {
    fn redirect(&self, route: &str);
}

/// Navigator for headless use: the redirect is only logged
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, route: &str) {
        tracing::info!(route = %route, "Redirect requested");
    }
}
