//! `info`: 마지막 요청/응답을 출력한다.

use anyhow::Result;
use async_trait::async_trait;

use super::typed_arguments;
use crate::application::config::ShellConfig;
use crate::application::context::ShellContext;
use crate::application::kernel::{Completion, KernelCommand};
use crate::domain::delivery::{DeliveryRequest, DeliveryResponse};
use crate::domain::line::KernelLine;
use crate::domain::mode::Transition;

const REQUEST_FLAGS: [&str; 4] = ["-url", "-method", "-body", "-header"];
const RESPONSE_FLAGS: [&str; 3] = ["status", "body", "headers"];

pub struct InfoCommand;

#[async_trait]
impl KernelCommand for InfoCommand {
    fn name(&self) -> &str {
        "info"
    }

    fn usage(&self) -> &str {
        "info [-url] [-method] [-body] [-header] [status] [body] [headers]"
    }

    fn completion(&self) -> Completion {
        Completion::MultiLevel
    }

    fn complete(&self, line: &str, _config: &ShellConfig) -> Vec<String> {
        let (typed, _) = typed_arguments(line);
        REQUEST_FLAGS
            .iter()
            .chain(RESPONSE_FLAGS.iter())
            .filter(|flag| !typed.contains(flag))
            .map(ToString::to_string)
            .collect()
    }

    async fn exec(&mut self, line: &KernelLine, ctx: &mut ShellContext) -> Result<Transition> {
        let request = ctx.session.request();
        let response = ctx.session.response();
        if request.is_none() && response.is_none() {
            ctx.reporter.raw(
                "no request has been made yet; send a command before inspecting it",
            );
            return Ok(Transition::None);
        }

        let args: Vec<&str> = line.args().iter().map(String::as_str).collect();

        if let Some(request) = &request {
            ctx.reporter.raw("Request =>");
            for out in request_info(request, &args) {
                ctx.reporter.raw(&out);
            }
        }

        match response {
            Some(response) => {
                ctx.reporter.raw("Response =>");
                for out in response_info(response, &args) {
                    ctx.reporter.raw(&out);
                }
            }
            None => ctx.reporter.raw("Response => (none)"),
        }

        Ok(Transition::Stay)
    }
}

fn request_info(request: &DeliveryRequest, args: &[&str]) -> Vec<String> {
    let mut out = Vec::new();

    if args.contains(&"-url") {
        out.push(request.url.clone());
    }
    if args.contains(&"-method") {
        out.push(request.verb.to_string());
    }
    if args.contains(&"-body") {
        let form = request
            .form
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        out.push(format!("form: {form}"));
    }
    if args.contains(&"-header") {
        out.extend(
            request
                .headers
                .iter()
                .map(|(name, value)| format!("{name}: {value}")),
        );
    }

    if out.is_empty() && !has_any(args, &RESPONSE_FLAGS) {
        out.push(request.to_string());
    }
    out
}

fn response_info(response: &DeliveryResponse, args: &[&str]) -> Vec<String> {
    let mut out = Vec::new();

    if args.contains(&"status") {
        out.push(response.status_line());
    }
    if args.contains(&"body") {
        out.push(format!("body: {}", response.body_text()));
    }
    if args.contains(&"headers") {
        out.extend(
            response
                .headers
                .iter()
                .map(|(name, value)| format!("{name}: {value}")),
        );
    }

    if out.is_empty() && !has_any(args, &REQUEST_FLAGS) {
        out.push(response.to_string());
    }
    out
}

fn has_any(args: &[&str], flags: &[&str]) -> bool {
    args.iter().any(|arg| flags.contains(arg))
}
