use jiff::Timestamp;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::{
    otp::with_otp,
    profile::{NewToken, TokenRecord},
    tokens::{OutputFormat, TokenContext, TokenError, join_cidr, validate_cidr_list},
};

/// Fields shown for a freshly created token. The key is left out.
#[derive(Debug, Serialize)]
struct CreatedToken<'a> {
    token: &'a str,
    created: Timestamp,
    readonly: bool,
    cidr_whitelist: Option<&'a [String]>,
}

impl<'a> From<&'a TokenRecord> for CreatedToken<'a> {
    fn from(record: &'a TokenRecord) -> Self {
        Self {
            token: &record.token,
            created: record.created,
            readonly: record.readonly,
            cidr_whitelist: record.cidr_whitelist.as_deref(),
        }
    }
}

impl CreatedToken<'_> {
    fn fields(&self) -> [(&'static str, String); 4] {
        [
            ("token", self.token.to_string()),
            ("created", self.created.to_string()),
            ("readonly", self.readonly.to_string()),
            ("cidr_whitelist", join_cidr(self.cidr_whitelist)),
        ]
    }
}

#[tracing::instrument(name = "token.create", skip_all, fields(readonly = context.options.read_only), err(level = "debug"))]
pub(super) async fn run(context: &TokenContext<'_>) -> Result<String, TokenError> {
    let auth = context.request_auth()?;
    let cidr_whitelist = validate_cidr_list(&context.options.cidr)?;
    let password = context.prompt.password().await?;

    tracing::info!("creating");

    let new_token = NewToken {
        password,
        readonly: context.options.read_only,
        cidr_whitelist,
    };
    let new_token = &new_token;
    let profile = context.profile;

    let created = with_otp(context.prompt, &auth, move |auth| async move {
        profile.create_token(&auth, new_token).await
    })
    .await?;

    tracing::debug!(key = %created.key, "created token");

    render(&CreatedToken::from(&created), context.options.format)
}

fn render(created: &CreatedToken<'_>, format: OutputFormat) -> Result<String, TokenError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(created)?),
        OutputFormat::Parseable => Ok(created
            .fields()
            .iter()
            .map(|(name, value)| format!("{name}\t{value}"))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Human => {
            let mut builder = Builder::default();

            for (name, value) in created.fields() {
                builder.push_record([name.to_string(), value]);
            }

            let mut table = builder.build();

            table.with(Style::ascii());

            Ok(table.to_string())
        }
    }
}
