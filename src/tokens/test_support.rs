use jiff::Timestamp;

use crate::{
    credentials::{Auth, MockCredentialResolver},
    profile::{MockProfileClient, TokenRecord},
    prompt::MockPrompt,
    tokens::{OutputFormat, TokenContext, TokenOptions},
};

pub(crate) const REGISTRY: &str = "https://registry.npmjs.org/";

pub(crate) const CREATED: &str = "2024-03-01T12:34:56.789Z";

pub(crate) struct Harness {
    pub credentials: MockCredentialResolver,
    pub profile: MockProfileClient,
    pub prompt: MockPrompt,
    pub options: TokenOptions,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Self {
            credentials: MockCredentialResolver::new(),
            profile: MockProfileClient::new(),
            prompt: MockPrompt::new(),
            options: TokenOptions::default(),
        }
    }

    pub(crate) fn with_format(format: OutputFormat) -> Self {
        let mut harness = Self::new();

        harness.options.format = format;
        harness
    }

    pub(crate) fn expect_credentials(&mut self, auth: Auth) {
        self.credentials
            .expect_credentials_by_uri()
            .once()
            .withf(|uri| uri == REGISTRY)
            .return_once(move |_| Ok(auth));
    }

    pub(crate) fn context(&self) -> TokenContext<'_> {
        TokenContext {
            registry: REGISTRY,
            options: &self.options,
            credentials: &self.credentials,
            profile: &self.profile,
            prompt: &self.prompt,
        }
    }
}

pub(crate) fn created() -> Timestamp {
    CREATED.parse().unwrap_or(Timestamp::UNIX_EPOCH)
}

pub(crate) fn record(key: &str, token: &str) -> TokenRecord {
    TokenRecord {
        key: key.to_string(),
        token: token.to_string(),
        created: created(),
        updated: created(),
        readonly: false,
        cidr_whitelist: None,
    }
}

pub(crate) fn args(args: &[&str]) -> Vec<String> {
    args.iter().map(ToString::to_string).collect()
}
