use anyhow::Result;
use colored::Colorize;
use rhtmx_typed_routes::{collect_routes, RouteParam};

pub fn execute(tree: &str) -> Result<()> {
    let source = super::tree_source(tree)?;
    let routes = collect_routes(&source);

    println!("{}", "Static routes".green().bold());
    for key in routes.static_keys() {
        println!("  {}", key);
    }

    println!();
    println!("{}", "Dynamic routes".green().bold());
    for (key, params) in routes.dynamic_keys() {
        println!("  {} {}", key, describe_params(params).dimmed());
    }

    println!();
    println!("Total: {}", routes.len().to_string().cyan());

    Ok(())
}

fn describe_params(params: &[RouteParam]) -> String {
    let names: Vec<String> = params
        .iter()
        .map(|param| {
            if param.is_catch_all {
                format!("{}[]", param.name)
            } else {
                param.name.clone()
            }
        })
        .collect();

    format!("({})", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_params() {
        let params = vec![RouteParam::new("org"), RouteParam::catch_all("path")];
        assert_eq!(describe_params(&params), "(org, path[])");
        assert_eq!(describe_params(&[]), "()");
    }
}
