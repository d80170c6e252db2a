use async_trait::async_trait;
use common::api::{self, Rpc};
use eyre::WrapErr;
use reqwest::{RequestBuilder, Response, header};
use tracing::{trace, warn};
use url::Url;

use crate::{config::ModalConfig, service::PasswordService};

#[derive(derivative::Derivative, Clone)]
#[derivative(Debug)]
pub struct RpcClient {
    #[derivative(Debug="ignore")]
    reqwest_client: reqwest::Client,
    validate_url: Url,
    change_url: Url,
    #[derivative(Debug="ignore")]
    session_cookie: Option<String>,
}

impl RpcClient {
    pub fn new(config: &ModalConfig) -> Self {
        Self {
            reqwest_client: reqwest::Client::new(),
            validate_url: config.validate_url.clone(),
            change_url: config.change_url.clone(),
            session_cookie: config.session_cookie.clone(),
        }
    }

    fn post(&self, url: &Url) -> RequestBuilder {
        let req = self.reqwest_client.post(url.clone());
        match &self.session_cookie {
            Some(cookie) => req.header(header::COOKIE, cookie),
            None => req,
        }
    }

    async fn send(&self, build: impl Fn() -> RequestBuilder) -> eyre::Result<Response> {
        let mut retries = 1;
        let res = loop {
            match build().send().await {
                Err(e) if e.is_request() && retries != 0 => {
                    warn!("request failed: {:#}", e);
                    retries -= 1;
                },
                e => break e,
            }
        }.wrap_err("Reqwest error")?;
        trace!(status = %res.status(), "response");
        Ok(res)
    }

    pub async fn call_json<T: Rpc>(&self, url: &Url, c: &T) -> api::Result<T::Ret> {
        let res = self.send(|| self.post(url).json(c)).await?;

        let status = res.status();
        if !status.is_success() {
            return Err(api::Error::UnexpectedStatus(status.as_u16()));
        }

        let body = res.bytes().await.wrap_err("Body error")?;
        Ok(serde_json::from_slice(&body).wrap_err("Deserialization error")?)
    }
}

#[async_trait(?Send)]
impl PasswordService for RpcClient {
    async fn validate_password(&self, req: &api::ValidatePassword) -> api::Result<bool> {
        let ret = self.call_json(&self.validate_url, req).await?;
        Ok(ret.valid)
    }

    async fn change_password(&self, req: &api::ChangePassword) -> api::Result<()> {
        let res = self.send(|| self.post(&self.change_url).form(req)).await?;

        let status = res.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(api::Error::from_status(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> RpcClient {
        let config = ModalConfig::from_toml(&format!(
            "validate_url = {:?}\nchange_url = {:?}\nsession_cookie = \"session=abc\"\n",
            server.url("/perfil/validar_senha"),
            server.url("/perfil/alterar_senha"),
        )).unwrap();
        RpcClient::new(&config)
    }

    fn validate(p: &str) -> api::ValidatePassword {
        api::ValidatePassword { current_password: p.to_owned() }
    }

    #[tokio::test]
    async fn validate_accepted() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/perfil/validar_senha")
                .header("cookie", "session=abc")
                .json_body(json!({"current_password": "abc123"}));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"valid": true}));
        });

        assert!(client(&server).validate_password(&validate("abc123")).await.unwrap());
        mock.assert();
    }

    #[tokio::test]
    async fn validate_rejected() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/perfil/validar_senha");
            then.status(200).json_body(json!({"valid": false}));
        });

        assert!(!client(&server).validate_password(&validate("nope")).await.unwrap());
    }

    #[tokio::test]
    async fn validate_server_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/perfil/validar_senha");
            then.status(500).json_body(json!({"valid": true}));
        });

        let e = client(&server).validate_password(&validate("abc123")).await.unwrap_err();
        assert!(matches!(e, api::Error::UnexpectedStatus(500)));
    }

    #[tokio::test]
    async fn validate_malformed_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/perfil/validar_senha");
            then.status(200).body("<html>login</html>");
        });

        let e = client(&server).validate_password(&validate("abc123")).await.unwrap_err();
        assert!(matches!(e, api::Error::ClientSideError(_)));
    }

    #[tokio::test]
    async fn validate_unreachable() {
        let config = ModalConfig::from_toml(
            "validate_url = \"http://127.0.0.1:1/v\"\nchange_url = \"http://127.0.0.1:1/c\"\n"
        ).unwrap();
        let e = RpcClient::new(&config).validate_password(&validate("abc123")).await.unwrap_err();
        assert!(matches!(e, api::Error::ClientSideError(_)));
    }

    #[tokio::test]
    async fn change_password_posts_the_form() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/perfil/alterar_senha")
                .header("content-type", "application/x-www-form-urlencoded")
                .body("current_password=old123&new_password=Abcdef1&confirm_password=Abcdef1");
            then.status(200);
        });

        let req = api::ChangePassword {
            current_password: "old123".into(),
            new_password: "Abcdef1".into(),
            confirm_password: "Abcdef1".into(),
        };
        client(&server).change_password(&req).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn change_password_rejected() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/perfil/alterar_senha");
            then.status(403);
        });

        let req = api::ChangePassword {
            current_password: "wrong1".into(),
            new_password: "Abcdef1".into(),
            confirm_password: "Abcdef1".into(),
        };
        let e = client(&server).change_password(&req).await.unwrap_err();
        assert!(matches!(e, api::Error::IncorrectPassword));
    }
}
