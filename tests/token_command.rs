use std::io;

use regtoken::{
    credentials::{CredentialsFile, nerf_dart},
    profile::HttpProfileClient,
    prompt::MockPrompt,
    tokens::{OutputFormat, TokenContext, TokenOptions, execute},
};
use serde_json::json;
use testresult::TestResult;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

const CREATED: &str = "2024-03-01T12:34:56.789Z";

struct Registry {
    server: MockServer,
    credentials: CredentialsFile,
    profile: HttpProfileClient,
}

impl Registry {
    async fn start() -> TestResult<Self> {
        let server = MockServer::start().await;
        let key = nerf_dart(&server.uri())
            .ok_or_else(|| io::Error::other("mock server uri has no nerf dart"))?;
        let credentials = CredentialsFile::from_toml(&format!("[\"{key}\"]\ntoken = \"s3cret\""))?;
        let profile = HttpProfileClient::new(&server.uri())?;

        Ok(Self {
            server,
            credentials,
            profile,
        })
    }

    async fn run(
        &self,
        options: &TokenOptions,
        prompt: &MockPrompt,
        args: &[&str],
    ) -> Result<String, regtoken::tokens::TokenError> {
        let uri = self.server.uri();
        let context = TokenContext {
            registry: &uri,
            options,
            credentials: &self.credentials,
            profile: &self.profile,
            prompt,
        };
        let args: Vec<String> = args.iter().map(ToString::to_string).collect();

        execute(&context, &args).await
    }

    async fn serve_list(&self, objects: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/-/npm/v1/tokens"))
            .and(header("authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "objects": objects,
                "urls": {},
            })))
            .mount(&self.server)
            .await;
    }
}

fn token_json(key: &str, token: &str, cidr: Option<&[&str]>) -> serde_json::Value {
    json!({
        "key": key,
        "token": token,
        "created": CREATED,
        "updated": CREATED,
        "readonly": cidr.is_some(),
        "cidr_whitelist": cidr,
    })
}

#[tokio::test]
async fn list_renders_a_table_of_stored_tokens() -> TestResult {
    let registry = Registry::start().await?;

    registry
        .serve_list(json!([
            token_json("abcd1234ef", "npm_abcdefgh", None),
            token_json("ijkl5678", "npm_ijklmnop", Some(&["192.168.1.1/32", "10.0.0.0/8"])),
        ]))
        .await;

    let output = registry
        .run(&TokenOptions::default(), &MockPrompt::new(), &["list"])
        .await?;

    assert!(output.contains("abcd1234 "), "{output}");
    assert!(!output.contains("abcd1234ef"), "{output}");
    assert!(output.contains("npm_ab…"), "{output}");
    assert!(output.contains("2024-03-01"), "{output}");
    assert!(output.contains("192.168.1.1/32,10.0.0.0/8"), "{output}");

    Ok(())
}

#[tokio::test]
async fn list_as_json_keeps_every_field() -> TestResult {
    let registry = Registry::start().await?;

    registry
        .serve_list(json!([token_json("abcd1234", "npm_abcdefgh", None)]))
        .await;

    let options = TokenOptions {
        format: OutputFormat::Json,
        ..TokenOptions::default()
    };

    let output = registry.run(&options, &MockPrompt::new(), &[]).await?;
    let parsed: serde_json::Value = serde_json::from_str(&output)?;

    assert_eq!(parsed[0]["key"], "abcd1234");
    assert_eq!(parsed[0]["token"], "npm_abcdefgh");
    assert_eq!(parsed[0]["readonly"], false);

    Ok(())
}

#[tokio::test]
async fn revoke_retries_deletions_with_a_prompted_otp() -> TestResult {
    let registry = Registry::start().await?;

    registry
        .serve_list(json!([
            token_json("abcd1234", "npm_abcdefgh", None),
            token_json("efgh5678", "npm_efghijkl", None),
        ]))
        .await;

    Mock::given(method("DELETE"))
        .and(header("npm-otp", "123456"))
        .respond_with(ResponseTemplate::new(204))
        .with_priority(1)
        .expect(2)
        .mount(&registry.server)
        .await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(401).insert_header("www-authenticate", "OTP"))
        .expect(2)
        .mount(&registry.server)
        .await;

    let mut prompt = MockPrompt::new();

    prompt
        .expect_otp()
        .once()
        .returning(|| Ok("123456".to_string()));

    let output = registry
        .run(&TokenOptions::default(), &prompt, &["rm", "abcd", "efgh"])
        .await?;

    assert_eq!(output, "Removed 2 tokens");

    Ok(())
}

#[tokio::test]
async fn revoke_reports_ambiguous_prefixes_without_deleting() -> TestResult {
    let registry = Registry::start().await?;

    registry
        .serve_list(json!([
            token_json("abcd1234", "npm_abcdefgh", None),
            token_json("abcd5678", "npm_efghijkl", None),
        ]))
        .await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&registry.server)
        .await;

    let error = registry
        .run(&TokenOptions::default(), &MockPrompt::new(), &["revoke", "abcd"])
        .await
        .err()
        .ok_or_else(|| io::Error::other("revoke should fail"))?;

    assert_eq!(
        error.to_string(),
        "Token ID \"abcd\" was ambiguous, a longer ID is needed"
    );
    assert_eq!(error.code(), Some("EAMBIGUOUS"));

    Ok(())
}

#[tokio::test]
async fn create_prompts_for_password_and_prints_the_new_token() -> TestResult {
    let registry = Registry::start().await?;

    Mock::given(method("POST"))
        .and(path("/-/npm/v1/tokens"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json(
            "abcd1234",
            "npm_full_token_value",
            Some(&["10.0.0.0/8"]),
        )))
        .expect(1)
        .mount(&registry.server)
        .await;

    let mut prompt = MockPrompt::new();

    prompt
        .expect_password()
        .once()
        .returning(|| Ok("hunter2".to_string().into()));

    let options = TokenOptions {
        format: OutputFormat::Parseable,
        cidr: vec!["10.0.0.0/8".to_string()],
        read_only: true,
        ..TokenOptions::default()
    };

    let output = registry.run(&options, &prompt, &["create"]).await?;
    let lines: Vec<_> = output.lines().collect();

    assert_eq!(lines[0], "token\tnpm_full_token_value");
    assert!(lines[1].starts_with("created\t2024-03-01T12:34:56.789Z"), "{output}");
    assert_eq!(lines[2], "readonly\ttrue");
    assert_eq!(lines[3], "cidr_whitelist\t10.0.0.0/8");

    Ok(())
}

#[tokio::test]
async fn create_rejects_ipv6_ranges_before_prompting() -> TestResult {
    let registry = Registry::start().await?;

    let mut prompt = MockPrompt::new();

    prompt.expect_password().never();

    let options = TokenOptions {
        cidr: vec!["::1/128".to_string()],
        ..TokenOptions::default()
    };

    let error = registry
        .run(&options, &prompt, &["create"])
        .await
        .err()
        .ok_or_else(|| io::Error::other("create should fail"))?;

    assert_eq!(
        error.to_string(),
        "CIDR whitelist can only contain IPv4 addresses, ::1/128 is IPv6"
    );

    Ok(())
}

#[tokio::test]
async fn created_token_is_listed_and_revoked_by_key_prefix() -> TestResult {
    let registry = Registry::start().await?;
    let created = token_json("f00dcafe1234", "npm_created_token", None);

    Mock::given(method("POST"))
        .and(path("/-/npm/v1/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(created.clone()))
        .expect(1)
        .mount(&registry.server)
        .await;

    registry
        .serve_list(json!([token_json("abcd1234", "npm_abcdefgh", None), created]))
        .await;

    Mock::given(method("DELETE"))
        .and(path("/-/npm/v1/tokens/token/f00dcafe1234"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&registry.server)
        .await;

    let mut prompt = MockPrompt::new();

    prompt
        .expect_password()
        .once()
        .returning(|| Ok("hunter2".to_string().into()));

    let parseable = TokenOptions {
        format: OutputFormat::Parseable,
        ..TokenOptions::default()
    };

    let output = registry.run(&parseable, &prompt, &["create"]).await?;

    assert!(output.starts_with("token\tnpm_created_token\n"), "{output}");

    let output = registry.run(&parseable, &prompt, &["list"]).await?;

    assert!(
        output
            .lines()
            .any(|line| line.starts_with("f00dcafe1234\tnpm_created_token\t")),
        "{output}"
    );

    let output = registry
        .run(&TokenOptions::default(), &prompt, &["revoke", "f00d"])
        .await?;

    assert_eq!(output, "Removed 1 token");

    Ok(())
}
