use tabled::{builder::Builder, settings::Style};

use crate::{
    otp::with_otp,
    profile::TokenRecord,
    tokens::{OutputFormat, TokenContext, TokenError, join_cidr, yes_no},
};

const ID_WIDTH: usize = 8;
const TOKEN_WIDTH: usize = 6;
const ELLIPSIS: char = '…';

const PARSEABLE_HEADER: [&str; 5] = ["key", "token", "created", "readonly", "CIDR whitelist"];
const TABLE_HEADER: [&str; 5] = ["id", "token", "created", "readonly", "CIDR whitelist"];

#[tracing::instrument(name = "token.list", skip_all, err(level = "debug"))]
pub(super) async fn run(context: &TokenContext<'_>) -> Result<String, TokenError> {
    let auth = context.request_auth()?;
    let profile = context.profile;

    tracing::info!("getting list");

    let tokens = with_otp(context.prompt, &auth, move |auth| async move {
        profile.list_tokens(&auth).await
    })
    .await?;

    tracing::debug!(count = tokens.len(), "listed tokens");

    render(&tokens, context.options.format)
}

fn render(tokens: &[TokenRecord], format: OutputFormat) -> Result<String, TokenError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(tokens)?),
        OutputFormat::Parseable => Ok(render_parseable(tokens)),
        OutputFormat::Human => Ok(render_table(tokens)),
    }
}

fn render_parseable(tokens: &[TokenRecord]) -> String {
    let mut lines = vec![PARSEABLE_HEADER.join("\t")];

    for token in tokens {
        lines.push(
            [
                token.key.clone(),
                token.token.clone(),
                token.created.to_string(),
                token.readonly.to_string(),
                join_cidr(token.cidr_whitelist.as_deref()),
            ]
            .join("\t"),
        );
    }

    lines.join("\n")
}

fn render_table(tokens: &[TokenRecord]) -> String {
    let mut builder = Builder::default();

    builder.push_record(TABLE_HEADER);

    for token in tokens {
        builder.push_record([
            truncate(&token.key, ID_WIDTH),
            format!("{}{ELLIPSIS}", truncate(&token.token, TOKEN_WIDTH)),
            token.created.strftime("%Y-%m-%d").to_string(),
            yes_no(token.readonly).to_string(),
            join_cidr(token.cidr_whitelist.as_deref()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::ascii());
    table.to_string()
}

fn truncate(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}
