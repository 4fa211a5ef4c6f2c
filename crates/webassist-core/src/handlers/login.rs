use async_trait::async_trait;
use tracing::info;

use super::{Handler, HandlerContext, report};
use crate::command::{Command, Intent};
use crate::engine::is_signin_url;
use crate::selector::{DomSearch, Target, TargetKind};

/// Sign-in: credentials (from any intent) or a bare login click.
pub struct LoginHandler;

impl LoginHandler {
    async fn login(&self, email: &str, password: &str, navigate: bool, ctx: &HandlerContext<'_>) -> bool {
        let engine = ctx.engine;

        if navigate {
            let current = engine.current_url().await.to_lowercase();
            if !is_signin_url(&current) && !current.contains("login") {
                info!("Not on a sign-in page ({}), opening {}", current, engine.config().login_url);
                if let Err(e) = engine.navigate(&engine.config().login_url).await {
                    engine.speak(&e.spoken()).await;
                    return true;
                }
            }
        }

        if let Err(e) = engine.fill(&Target::of_kind(TargetKind::Email), email).await {
            engine.speak(&e.spoken()).await;
            return true;
        }
        if let Err(e) = engine.fill(&Target::of_kind(TargetKind::Password), password).await {
            engine.speak(&e.spoken()).await;
            return true;
        }

        let result = engine.click(&Target::of_kind(TargetKind::LoginButton)).await;
        report(ctx, result, "Logged in with the provided credentials").await
    }
}

#[async_trait]
impl Handler for LoginHandler {
    fn name(&self) -> &str {
        "login"
    }

    async fn handle(&self, command: &Command, ctx: &HandlerContext<'_>) -> bool {
        if let (Some(email), Some(password)) = (command.param("email"), command.param("password")) {
            let navigate = command.intent == Intent::Login;
            return self.login(email, password, navigate, ctx).await;
        }

        if command.intent != Intent::Login {
            return false;
        }

        let target = Target::of_kind(TargetKind::LoginButton)
            .prefer(TargetKind::LoginLink.selectors().iter().copied())
            .with_dom_search(DomSearch::login_link());
        let result = ctx.engine.click(&target).await;
        report(ctx, result, "Clicked the login button").await
    }
}
