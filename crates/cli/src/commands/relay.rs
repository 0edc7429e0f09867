//! oversight relay command

use crate::context::Context;
use clap::Args;
use feedback::GitHubIssueTracker;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct RelayCommand {
    /// Address to listen on (overrides relay.bind)
    #[arg(long)]
    pub bind: Option<String>,
}

impl RelayCommand {
    pub async fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        let mut config = ctx.config.relay.clone();
        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }

        println!("Starting feedback relay on {} (ctrl-c to stop)", config.bind);
        let tracker = Arc::new(GitHubIssueTracker::from_config(&config));
        feedback::serve(&config, tracker).await?;
        Ok(())
    }
}
