//! Composite field rendering through a real logger

use pretty_assertions::assert_eq;
use svckit_logging::{composite_field, LogContext};
use tests::fixtures;
use tests::log_capture::{capture_logger, plain_config, strip_timestamp};

#[test]
fn test_partial_context_omits_missing_tags() {
    let (logger, buffer) = capture_logger(plain_config());
    let ctx = fixtures::partial_context();

    logger.info("issue_refund", Some(&ctx), format_args!("refund {} queued", "r-1"));

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(
        strip_timestamp(&lines[0]),
        "[INFO] [|FN:issue_refund|IP:10.0.0.1|SS:sess123] refund r-1 queued"
    );
    assert!(!lines[0].contains("|US:"));
    assert!(!lines[0].contains("|TY:"));
}

#[test]
fn test_no_context_has_no_trailing_delimiter() {
    let (logger, buffer) = capture_logger(plain_config());

    logger.warn("sweep", None, format_args!("nothing to do"));

    let lines = buffer.lines();
    assert_eq!(strip_timestamp(&lines[0]), "[WARN] [|FN:sweep] nothing to do");
}

#[test]
fn test_full_context_order() {
    let ctx = fixtures::mobile_context();
    assert_eq!(
        composite_field("checkout", Some(&ctx)),
        "|FN:checkout|IP:203.0.113.7|SS:2b9KqQ|US:user-881|TY:MOB"
    );
}

#[test]
fn test_custom_request_type() {
    let ctx = LogContext::new().with_request_type("WEB");
    assert_eq!(composite_field("render", Some(&ctx)), "|FN:render|TY:WEB");
}

#[test]
fn test_every_severity_label() {
    let (logger, buffer) = capture_logger(plain_config().with_filter("debug"));

    logger.debug("f", None, format_args!("d"));
    logger.info("f", None, format_args!("i"));
    logger.warn("f", None, format_args!("w"));
    logger.error("f", None, format_args!("e"));

    let labels: Vec<String> = buffer
        .lines()
        .iter()
        .map(|line| strip_timestamp(line).split(' ').next().unwrap_or("").to_string())
        .collect();
    assert_eq!(labels, vec!["[DEBUG]", "[INFO]", "[WARN]", "[ERROR]"]);
}

#[test]
fn test_concurrent_records_stay_whole() {
    let (logger, buffer) = capture_logger(plain_config());

    std::thread::scope(|scope| {
        for worker in 0..8 {
            let logger = &logger;
            scope.spawn(move || {
                let ctx = LogContext::new().with_session_id(format!("w{}", worker));
                for n in 0..25 {
                    logger.info("worker", Some(&ctx), format_args!("step {}", n));
                }
            });
        }
    });

    let lines = buffer.lines();
    assert_eq!(lines.len(), 200);
    assert!(lines
        .iter()
        .all(|line| strip_timestamp(line).starts_with("[INFO] [|FN:worker|SS:w")));
}
