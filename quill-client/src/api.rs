//! Typed operations against the backend. One blocking client, one
//! bearer token, no retries: a failed call surfaces at the call site.

use crate::{
    drafts::{BlogDraft, FormValue},
    Error, Result, CONFIG,
};
use quill_api::{
    auth::{ApiUser, LoginData, LoginResponse, VerifyResponse},
    posts::{ApiMessage, Blog, BlogEnvelope, BlogList, ListQuery},
};
use quill_common::request;
use reqwest::blocking::{multipart, Client, ClientBuilder, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// How much of a non-JSON error body is kept when surfacing it.
const ERROR_BODY_LIMIT: usize = 200;

pub struct Api {
    http: Client,
    base: Url,
    token: Option<String>,
}

impl Api {
    pub fn new(token: Option<String>) -> Result<Self> {
        let mut builder = ClientBuilder::new().default_headers(request::headers());
        if let Some(proxy) = CONFIG.proxy() {
            builder = builder.proxy(proxy.clone());
        }
        Ok(Api {
            http: builder.build()?,
            base: Url::parse(&CONFIG.api_url)?,
            token,
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base.join(path).map_err(Error::from)
    }

    /// Attaches the bearer token, refusing to go further without one.
    fn authed(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.token.as_ref().ok_or(Error::Unauthorized)?;
        let (name, value) = request::bearer(token).map_err(|_| Error::Unauthorized)?;
        Ok(req.header(name, value))
    }

    pub fn list(&self, query: &ListQuery) -> Result<BlogList> {
        let req = self
            .authed(self.http.get(self.url("/admin/blogs")?))?
            .query(&query.to_pairs());
        debug!("GET /admin/blogs {:?}", query);
        parse_json(req.send()?)
    }

    pub fn get(&self, id: &str) -> Result<Blog> {
        let req = self.authed(self.http.get(self.url(&format!("/admin/blogs/{}", id))?))?;
        let envelope: BlogEnvelope = parse_json(req.send()?)?;
        Ok(envelope.data)
    }

    pub fn create(&self, draft: &BlogDraft) -> Result<Blog> {
        draft.validate()?;
        let form = to_multipart(draft)?;
        let req = self
            .authed(self.http.post(self.url("/admin/blogs")?))?
            .multipart(form);
        let envelope: BlogEnvelope = parse_json(req.send()?)?;
        Ok(envelope.data)
    }

    pub fn update(&self, id: &str, draft: &BlogDraft) -> Result<Blog> {
        draft.validate()?;
        let form = to_multipart(draft)?;
        let req = self
            .authed(self.http.put(self.url(&format!("/admin/blogs/{}", id))?))?
            .multipart(form);
        let envelope: BlogEnvelope = parse_json(req.send()?)?;
        Ok(envelope.data)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let req = self.authed(
            self.http
                .delete(self.url(&format!("/admin/blogs/{}", id))?),
        )?;
        let _: ApiMessage = parse_json(req.send()?)?;
        Ok(())
    }

    /// Flips `isPublished` and nothing else. The request carries no
    /// body at all.
    pub fn toggle_publish(&self, id: &str) -> Result<Blog> {
        let req = self.toggle_publish_request(id)?;
        let envelope: BlogEnvelope = parse_json(req.send()?)?;
        Ok(envelope.data)
    }

    fn toggle_publish_request(&self, id: &str) -> Result<RequestBuilder> {
        self.authed(
            self.http
                .patch(self.url(&format!("/admin/blogs/{}/publish", id))?),
        )
    }

    pub fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let data = LoginData {
            email: email.to_owned(),
            password: password.to_owned(),
            client: CONFIG.client_id.clone(),
        };
        let req = self.http.post(self.url("/auth/login")?).json(&data);
        parse_json(req.send()?)
    }

    /// Asks the backend who the stored token belongs to. `None` means
    /// the token is no longer good.
    pub fn verify(&self) -> Result<Option<ApiUser>> {
        let req = self.authed(self.http.get(self.url("/auth/verify-token")?))?;
        match parse_json::<VerifyResponse>(req.send()?) {
            Ok(v) => Ok(v.user),
            Err(Error::Unauthorized) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn logout(&self) -> Result<()> {
        let req = self.authed(self.http.post(self.url("/auth/logout")?))?;
        let res = req.send()?;
        debug!("POST /auth/logout -> {}", res.status());
        Ok(())
    }
}

fn to_multipart(draft: &BlogDraft) -> Result<multipart::Form> {
    let mut form = multipart::Form::new();
    for (name, value) in draft.form_fields()? {
        form = match value {
            FormValue::Text(text) => form.text(name, text),
            FormValue::File(path) => form.file(name, path)?,
        };
    }
    Ok(form)
}

fn parse_json<T: DeserializeOwned>(res: Response) -> Result<T> {
    let status = res.status();
    let body = res.text()?;
    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::Unauthorized);
    }
    if status.is_success() {
        serde_json::from_str(&body).map_err(Error::from)
    } else {
        Err(error_from_body(status.as_u16(), &body))
    }
}

/// Maps a non-2xx body onto the error taxonomy: a JSON `message` when
/// there is one, the truncated raw text otherwise.
fn error_from_body(status: u16, body: &str) -> Error {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => {
            let message = value
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("request failed")
                .to_owned();
            Error::Api { status, message }
        }
        Err(_) => Error::UnexpectedBody {
            status,
            body: quill_common::utils::truncate_chars(body, ERROR_BODY_LIMIT),
        },
    }
}
