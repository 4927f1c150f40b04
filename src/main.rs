extern crate env_logger;
extern crate failure;
#[macro_use]
extern crate log;
extern crate speech_parameters;

use std::env;

use speech_parameters::{FactoryParameter, SessionParameter, SpeechFactory, Value, ValueCollection};

/// Raw parameter ids from a comma separated variable, or `default` when unset.
fn raw_ids(var: &str, default: &[i32]) -> Result<Vec<i32>, failure::Error> {
    match env::var(var) {
        Ok(list) => {
            let mut ids = Vec::new();
            for id in list.split(',').map(str::trim).filter(|id| !id.is_empty()) {
                ids.push(id.parse::<i32>()?);
            }
            Ok(ids)
        }
        Err(_) => Ok(default.to_vec()),
    }
}

fn main() -> Result<(), failure::Error> {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "debug");
    }
    env_logger::init();

    info!("start");

    let args: Vec<String> = env::args().skip(1).collect();
    let factory = match args.as_slice() {
        [key, region] => SpeechFactory::from_subscription(key, region)?,
        _ => SpeechFactory::from_env()?,
    };

    for raw in raw_ids("SPEECH_FACTORY_PARAMETERS", &[1, 2, 3, 4])? {
        let value = factory.parameter(FactoryParameter::from_raw(raw)?)?;
        info!("factory {}: {:?}", value.name(), value.get_string("<unset>")?);
    }

    let recognizer = factory.create_speech_recognizer()?;
    let session = recognizer.session()?;
    for raw in raw_ids("SPEECH_SESSION_PARAMETERS", &[1, 2])? {
        let value = session.parameter(SessionParameter::from_raw(raw)?)?;
        debug!("session {} {}: {:?}", session.get_handle(), value.name(), value.get_string("<unset>")?);
    }
    session.set_bool("SPEECH-Verbose", true)?;
    debug!("session verbose: {}", session.get_bool("SPEECH-Verbose", None)?);
    session.close()?;

    info!("done");
    Ok(())
}
