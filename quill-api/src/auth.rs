#[derive(Clone, Serialize)]
pub struct LoginData {
    pub email: String,
    pub password: String,
    /// Which frontend is asking. The backend scopes tokens by client.
    pub client: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApiUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: ApiUser,
}

#[derive(Clone, Debug, Deserialize)]
pub struct VerifyResponse {
    #[serde(default)]
    pub user: Option<ApiUser>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_without_user_is_logged_out() {
        let v: VerifyResponse = serde_json::from_str("{}").unwrap();
        assert!(v.user.is_none());

        let v: VerifyResponse = serde_json::from_str(
            r#"{"user": {"id": "1", "email": "admin@example.com", "name": "Admin"}}"#,
        )
        .unwrap();
        assert_eq!(v.user.unwrap().email, "admin@example.com");
    }
}
