//! 페이로드 전달 방식과 요청/응답 값 객체.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 인코딩된 페이로드를 실어 보내는 네 가지 wire 형태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    /// GET 쿼리 파라미터
    #[default]
    #[serde(alias = "get")]
    Query,
    /// POST form body
    #[serde(alias = "post")]
    Body,
    /// 요청 헤더
    Header,
    /// 쿠키 헤더
    Cookie,
}

impl DeliveryMethod {
    pub const ALL: [DeliveryMethod; 4] = [
        DeliveryMethod::Query,
        DeliveryMethod::Body,
        DeliveryMethod::Header,
        DeliveryMethod::Cookie,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Query => "query",
            DeliveryMethod::Body => "body",
            DeliveryMethod::Header => "header",
            DeliveryMethod::Cookie => "cookie",
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMethod {
    type Err = String;

    /// 이름(query/body/header/cookie), HTTP 동사 별칭, 예전 숫자 코드(0~3)를 모두 받는다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "query" | "get" | "0" => Ok(DeliveryMethod::Query),
            "body" | "post" | "1" => Ok(DeliveryMethod::Body),
            "header" | "2" => Ok(DeliveryMethod::Header),
            "cookie" | "3" => Ok(DeliveryMethod::Cookie),
            other => Err(format!(
                "unknown delivery method `{other}` (expected query, body, header or cookie)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Post,
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 전송 직전의 요청 기록.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRequest {
    pub verb: HttpVerb,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
    /// 제출된 form 값. 세션이 조회 시점에 다시 채운다.
    pub form: Vec<(String, String)>,
}

impl fmt::Display for DeliveryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.verb, self.url)?;
        for (name, value) in &self.headers {
            writeln!(f, "{name}: {value}")?;
        }
        if let Some(body) = &self.body {
            write!(f, "\n{}", String::from_utf8_lossy(body))?;
        }
        Ok(())
    }
}

/// 수신한 응답 기록.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryResponse {
    pub status: u16,
    pub reason: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl DeliveryResponse {
    pub fn status_line(&self) -> String {
        if self.reason.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.reason)
        }
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

impl fmt::Display for DeliveryResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.status_line())?;
        for (name, value) in &self.headers {
            writeln!(f, "{name}: {value}")?;
        }
        write!(f, "\n{}", self.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_method_names_and_legacy_codes() {
        assert_eq!("query".parse(), Ok(DeliveryMethod::Query));
        assert_eq!("POST".parse(), Ok(DeliveryMethod::Body));
        assert_eq!("2".parse(), Ok(DeliveryMethod::Header));
        assert_eq!(" cookie ".parse(), Ok(DeliveryMethod::Cookie));
        assert!("smoke-signal".parse::<DeliveryMethod>().is_err());
    }

    #[test]
    fn method_round_trips_through_json() {
        let json = serde_json::to_string(&DeliveryMethod::Header).unwrap();
        assert_eq!(json, "\"header\"");
        let parsed: DeliveryMethod = serde_json::from_str("\"post\"").unwrap();
        assert_eq!(parsed, DeliveryMethod::Body);
    }

    #[test]
    fn response_status_classification() {
        let mut response = DeliveryResponse {
            status: 404,
            reason: "Not Found".to_string(),
            headers: BTreeMap::new(),
            body: b"missing".to_vec(),
        };
        assert!(response.is_error());
        assert_eq!(response.status_line(), "404 Not Found");

        response.status = 302;
        response.reason.clear();
        assert!(!response.is_error());
        assert_eq!(response.status_line(), "302");
    }
}
