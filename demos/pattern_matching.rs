use okerr::{err, json, safely, Result, Thrown};

#[derive(Debug, PartialEq)]
enum Code {
    Missing,
    Invalid,
}

fn port(config: &str) -> Result<u16, Code, String> {
    let value = match json::parse::<serde_json::Value>(config) {
        Result::Ok(value) => value.into_value(),
        Result::Err(e) => {
            let (parse_error, _) = e.into_parts();
            return err(Code::Invalid)
                .with_info(config.to_string())
                .with_cause(parse_error)
                .into();
        }
    };

    match value.get("port").and_then(|port| port.as_u64()) {
        Some(port) if port <= u64::from(u16::MAX) => okerr::ok(port as u16).into(),
        Some(port) => err(Code::Invalid).with_info(port.to_string()).into(),
        None => err(Code::Missing).with_info(config.to_string()).into(),
    }
}

fn main() {
    for config in [r#"{"port": 8080}"#, r#"{"host": "x"}"#, "{", r#"{"port": 70000}"#] {
        let described = port(config)
            .matching()
            .ok(|port| format!("listening on {}", port.value()))
            .on(Code::Missing, |e| format!("no port in {}", e.info()))
            .otherwise(|rest| {
                let chain = rest
                    .as_err()
                    .map(|e| e.cause_chain_strings().join(" <- "))
                    .unwrap_or_default();
                format!("invalid config: {}", chain)
            });
        println!("{}", described);
    }

    let caught = safely(|| -> u16 { port("{}").or_throw() });
    let described = caught
        .matching()
        .on_type::<okerr::Unwrapped, _>(|e| format!("or_throw: {}", e.error()))
        .otherwise(|rest| format!("{:?}", rest.error().and_then(Thrown::message)));
    println!("{}", described);
}
