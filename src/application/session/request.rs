//! 전달 방식별 요청 조립.

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::Url;

use super::DeliveryError;
use crate::domain::delivery::{DeliveryMethod, DeliveryRequest, HttpVerb};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// base64 패딩(`=`)과 `/`는 그대로 두고 form/query 구분자와 `+`만 이스케이프한다.
const FORM_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// 설정된 전달 방식에 맞춰 요청 한 건을 만든다.
pub fn build_request(
    method: DeliveryMethod,
    host: &str,
    parameter: &str,
    encoded: &str,
) -> Result<DeliveryRequest, DeliveryError> {
    validate_host(host)?;

    let mut headers = BTreeMap::new();
    let request = match method {
        DeliveryMethod::Query => DeliveryRequest {
            verb: HttpVerb::Get,
            url: format!("{host}?{}={}", escape(parameter), escape(encoded)),
            headers,
            body: None,
            form: Vec::new(),
        },
        DeliveryMethod::Body => {
            headers.insert("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string());
            DeliveryRequest {
                verb: HttpVerb::Post,
                url: host.to_string(),
                headers,
                body: Some(format!("{}={}", escape(parameter), escape(encoded)).into_bytes()),
                form: Vec::new(),
            }
        }
        DeliveryMethod::Header => {
            validate_token("header name", parameter)?;
            validate_header_value(encoded)?;
            headers.insert(parameter.to_string(), encoded.to_string());
            DeliveryRequest {
                verb: HttpVerb::Get,
                url: host.to_string(),
                headers,
                body: None,
                form: Vec::new(),
            }
        }
        DeliveryMethod::Cookie => {
            validate_token("cookie name", parameter)?;
            validate_cookie_value(encoded)?;
            headers.insert("Cookie".to_string(), format!("{parameter}={encoded}"));
            DeliveryRequest {
                verb: HttpVerb::Get,
                url: host.to_string(),
                headers,
                body: None,
                form: Vec::new(),
            }
        }
    };

    Ok(request)
}

fn escape(value: &str) -> String {
    utf8_percent_encode(value, FORM_VALUE).to_string()
}

fn validate_host(host: &str) -> Result<(), DeliveryError> {
    if host.trim().is_empty() {
        return Err(DeliveryError::InvalidRequest("target url is empty".to_string()));
    }

    let url = Url::parse(host)
        .map_err(|err| DeliveryError::InvalidRequest(format!("invalid target url `{host}`: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(DeliveryError::InvalidRequest(format!(
            "unsupported url scheme `{other}` (expected http or https)"
        ))),
    }
}

// RFC 7230 token 문자만 허용한다.
fn validate_token(kind: &str, name: &str) -> Result<(), DeliveryError> {
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b));
    if valid {
        Ok(())
    } else {
        Err(DeliveryError::InvalidRequest(format!("invalid {kind} `{name}`")))
    }
}

fn validate_header_value(value: &str) -> Result<(), DeliveryError> {
    if value.bytes().any(|b| b.is_ascii_control() && b != b'\t') {
        return Err(DeliveryError::InvalidRequest(
            "payload contains control characters; enable encoding for header delivery"
                .to_string(),
        ));
    }
    Ok(())
}

fn validate_cookie_value(value: &str) -> Result<(), DeliveryError> {
    // RFC 6265 cookie-octet: 제어 문자, 공백, DQUOTE, `,`, `;`, `\` 제외.
    if value.bytes().any(|b| {
        b.is_ascii_control() || b.is_ascii_whitespace() || matches!(b, b';' | b',' | b'"' | b'\\')
    }) {
        return Err(DeliveryError::InvalidRequest(
            "payload is not a valid cookie value; enable encoding for cookie delivery".to_string(),
        ));
    }
    Ok(())
}
