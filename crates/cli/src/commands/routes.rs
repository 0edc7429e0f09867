//! oversight routes command

use crate::context::Context;
use clap::Args;
use composer::ROUTES;
use console::style;
use serde_json::json;
use shared::resource_path;

#[derive(Debug, Args)]
pub struct RoutesCommand {}

impl RoutesCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        let base = &ctx.config.base_path;

        if ctx.json {
            let routes: Vec<_> = ROUTES
                .iter()
                .map(|route| {
                    json!({
                        "name": route.name,
                        "resources": route
                            .resources
                            .iter()
                            .map(|id| resource_path(base, *id))
                            .collect::<Vec<_>>(),
                    })
                })
                .collect();
            return ctx.print_json(&routes);
        }

        for route in ROUTES {
            println!("{}", style(route.name).bold());
            for id in route.resources {
                println!("  {}", resource_path(base, *id));
            }
        }
        Ok(())
    }
}
