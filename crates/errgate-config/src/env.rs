use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Replace `{{ env.VAR }}` and `{{ env.VAR | default("x") }}` placeholders
///
/// Comment lines are left untouched so documented examples in a config file
/// do not need their variables set.
pub fn expand_env(input: &str) -> anyhow::Result<String> {
    fn placeholder() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| {
            Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
                .expect("placeholder pattern is valid")
        })
    }

    let mut expanded: Vec<String> = Vec::new();

    for line in input.split('\n') {
        if line.trim_start().starts_with('#') {
            expanded.push(line.to_owned());
            continue;
        }

        let mut failure = None;
        let replaced = placeholder().replace_all(line, |caps: &Captures<'_>| {
            resolve(caps).unwrap_or_else(|e| {
                failure.get_or_insert(e);
                String::new()
            })
        });

        if let Some(e) = failure {
            return Err(e);
        }
        expanded.push(replaced.into_owned());
    }

    Ok(expanded.join("\n"))
}

fn resolve(caps: &Captures<'_>) -> anyhow::Result<String> {
    let key = &caps[1];
    let Some(name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        anyhow::bail!("only `env.` variables can be expanded, found `{key}`");
    };

    match (std::env::var(name), caps.get(2)) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.as_str().to_owned()),
        (Err(_), None) => anyhow::bail!("environment variable `{name}` is not set"),
    }
}
