use anyhow::Result;
use clap::Args;
use kfetch::{CancellationToken, FetchOptions, Kfetch, ResponseResult};
use serde_json::Value;

use crate::config::parse_header;

/// HTTP verbs the client supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

#[derive(Args, Debug)]
pub struct RequestSubCommand {
    /// Path appended to the configured base URL
    path: String,
    /// Extra header as name:value (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,
    /// Request body sent as-is
    #[arg(short, long)]
    data: Option<String>,
    /// Send only the headers given on the command line
    #[arg(long)]
    replace_headers: bool,
}

impl RequestSubCommand {
    fn fetch_options(&self, signal: CancellationToken) -> FetchOptions {
        let mut options = FetchOptions::new()
            .signal(signal)
            .unset_initial_headers(self.replace_headers);

        for (name, value) in &self.headers {
            options = options.header(name.clone(), value.clone());
        }

        if let Some(data) = &self.data {
            options = options.body(data.clone());
        }

        options
    }
}

pub async fn request(
    client: &Kfetch,
    verb: Verb,
    sub_command_args: &RequestSubCommand,
    signal: CancellationToken,
) -> Result<()> {
    let path = sub_command_args.path.as_str();
    let options = Some(sub_command_args.fetch_options(signal));

    let result: ResponseResult<Value> = match verb {
        Verb::Get => client.get(path, options).await?,
        Verb::Post => client.post(path, options).await?,
        Verb::Patch => client.patch(path, options).await?,
        Verb::Delete => client.delete(path, options).await?,
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
