//! oversight load command

use crate::context::Context;
use anyhow::Context as _;
use clap::Args;
use composer::{route, route_names, RouteLoader};
use console::style;
use serde_json::Value;

#[derive(Debug, Args)]
pub struct LoadCommand {
    /// Route to compose (admin, innovator, protocol-builder)
    pub route: String,
}

impl LoadCommand {
    pub async fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        let spec = route(&self.route).with_context(|| {
            format!(
                "unknown route '{}' (known: {})",
                self.route,
                route_names().join(", ")
            )
        })?;

        let loader = RouteLoader::new(ctx.fetcher(), &ctx.config.base_path);
        let view_model = loader.load(spec).await?;

        if ctx.json {
            return ctx.print_json(&view_model);
        }

        println!("{} {}", style("✓").green(), style(spec.name).bold());
        for key in view_model.keys() {
            println!("  {:<26} {}", key, describe(view_model.get(key)));
        }
        Ok(())
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) => format!("{} items", items.len()),
        Some(Value::Object(map)) => format!("{} keys", map.len()),
        Some(Value::Null) | None => "empty".to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe() {
        assert_eq!(describe(Some(&json!([1, 2]))), "2 items");
        assert_eq!(describe(Some(&json!({"a": 1}))), "1 keys");
        assert_eq!(describe(None), "empty");
    }
}
