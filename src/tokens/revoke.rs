use futures::future::join_all;
use rustc_hash::FxHashSet;

use crate::{
    credentials::RequestAuth,
    otp::with_otp,
    profile::{ProfileError, TokenRecord},
    tokens::{OutputFormat, RemovalFailure, TokenContext, TokenError},
};

#[tracing::instrument(name = "token.revoke", skip_all, fields(requested = ids.len()), err(level = "debug"))]
pub(super) async fn run(context: &TokenContext<'_>, ids: &[String]) -> Result<String, TokenError> {
    if ids.is_empty() {
        return Err(TokenError::MissingTokenKey);
    }

    let auth = context.request_auth()?;
    let profile = context.profile;

    tracing::info!("getting existing list");

    let tokens = with_otp(context.prompt, &auth, move |auth| async move {
        profile.list_tokens(&auth).await
    })
    .await?;

    let targets = resolve_targets(&tokens, ids)?;

    tracing::info!(count = targets.len(), "removing tokens");

    remove_all(context, &auth, &targets).await?;

    render(&targets, context.options.format)
}

/// Resolve each identifier to the value sent for deletion: the identifier
/// itself when it is a full token value, otherwise the single key it
/// prefixes. Tokens named more than once are only removed once.
fn resolve_targets(tokens: &[TokenRecord], ids: &[String]) -> Result<Vec<String>, TokenError> {
    let mut seen = FxHashSet::default();
    let mut targets = Vec::with_capacity(ids.len());

    for id in ids {
        let (record, target) = resolve(tokens, id)?;

        if seen.insert(record.key.as_str()) {
            targets.push(target);
        }
    }

    Ok(targets)
}

fn resolve<'a>(tokens: &'a [TokenRecord], id: &str) -> Result<(&'a TokenRecord, String), TokenError> {
    if let Some(record) = tokens.iter().find(|record| record.token == id) {
        return Ok((record, id.to_string()));
    }

    let mut matches = tokens.iter().filter(|record| record.key.starts_with(id));

    match (matches.next(), matches.next()) {
        (Some(record), None) => Ok((record, record.key.clone())),
        (Some(_), Some(_)) => Err(TokenError::AmbiguousToken(id.to_string())),
        (None, _) => Err(TokenError::UnknownToken(id.to_string())),
    }
}

/// Issue every deletion concurrently and wait for all of them. Deletions
/// refused for lack of a one-time password share a single prompt and are
/// retried once with its answer.
async fn remove_all(
    context: &TokenContext<'_>,
    auth: &RequestAuth,
    targets: &[String],
) -> Result<(), TokenError> {
    let profile = context.profile;

    let results = join_all(
        targets
            .iter()
            .map(|target| async move { (target, profile.remove_token(auth, target).await) }),
    )
    .await;

    let mut failures = Vec::new();
    let mut needs_otp = Vec::new();

    for (target, result) in results {
        match result {
            Ok(()) => tracing::debug!(%target, "removed token"),
            Err(ProfileError::OtpRequired) => needs_otp.push(target),
            Err(error) => failures.push(RemovalFailure {
                key: target.clone(),
                error,
            }),
        }
    }

    if !needs_otp.is_empty() {
        let retry = auth.with_otp(context.prompt.otp().await?);
        let retry = &retry;

        let results = join_all(
            needs_otp
                .into_iter()
                .map(|target| async move { (target, profile.remove_token(retry, target).await) }),
        )
        .await;

        failures.extend(results.into_iter().filter_map(|(target, result)| {
            result.err().map(|error| RemovalFailure {
                key: target.clone(),
                error,
            })
        }));
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(TokenError::RemoveFailed(failures))
    }
}

fn render(targets: &[String], format: OutputFormat) -> Result<String, TokenError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(targets)?),
        OutputFormat::Parseable => Ok(targets.join("\n")),
        OutputFormat::Human => {
            let noun = if targets.len() == 1 { "token" } else { "tokens" };

            Ok(format!("Removed {} {noun}", targets.len()))
        }
    }
}
