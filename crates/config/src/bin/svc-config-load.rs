//! Load a minimal service schema the way a service entry point does.
//!
//! Reads `-config` from its own arguments (falling back to `CONFIG_PATH`),
//! exits through `must_load` on failure, and prints what was loaded. The
//! schema is loaded twice to show the flag is honored on every load.

use svc_config::sections::Redis;
use svc_config::{ConfigSchema, FieldSpec, Section, must_load, try_load};

#[derive(Debug, Default)]
struct Service {
    env: String,
    name: String,
    redis: Redis,
}

impl Section for Service {
    fn fields() -> Vec<FieldSpec<Self>> {
        type F = FieldSpec<Service>;
        let mut fields = vec![
            F::string("env", |c, v| c.env = v).required(),
            F::string("name", |c, v| c.name = v).required(),
        ];
        fields.extend(F::nested::<Redis>("redis", |c| &mut c.redis));
        fields
    }
}

impl ConfigSchema for Service {
    fn environment_name(&self) -> &str {
        &self.env
    }
}

fn main() {
    let (service, environment) = must_load::<Service>();
    println!("environment={environment}");
    println!("name={}", service.name);
    println!("redis={}:{}", service.redis.host, service.redis.port);

    match try_load::<Service>() {
        Ok(again) => {
            println!("path={}", again.path().display());
            println!("reloaded={}", again.config.name == service.name);
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
