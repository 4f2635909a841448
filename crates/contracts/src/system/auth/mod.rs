use serde::{Deserialize, Serialize};

use super::access::Role;

/// Тело запроса `POST /auth/login` к REST API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub data: LoginData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_parses_api_shape() {
        let json = r#"{ "data": { "token": "eyJhbGciOi", "role": "SALES_REP" } }"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.token, "eyJhbGciOi");
        assert_eq!(response.data.role, Role::SalesRep);
    }

    #[test]
    fn test_login_response_rejects_unknown_role() {
        let json = r#"{ "data": { "token": "t", "role": "ADMIN" } }"#;
        assert!(serde_json::from_str::<LoginResponse>(json).is_err());
    }
}
