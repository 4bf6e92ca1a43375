//! Built-in plugins
//!
//! | name         | kind        | answers                                  |
//! |--------------|-------------|------------------------------------------|
//! | `hash`       | `hash`      | `sha256 hello`                           |
//! | `base64`     | `base64`    | `base64 encode hello`                    |
//! | `uuid`       | `uuid`      | `generate uuid`                          |
//! | `timestamp`  | `timestamp` | `unix 1700000000`                        |
//! | `convert`    | `convert`   | `10 km to miles`                         |
//! | `calculator` | `math`      | `2 + 3 * 4`, `15% of 80`                 |
//!
//! [`builtins`] returns them in the order above. The converter must come
//! before the calculator so that "what is 10 km in miles" is not taken for
//! arithmetic.

mod calculator;
mod converter;
mod encoding;
mod hash;
mod identifier;
mod timestamp;

pub use calculator::CalculatorPlugin;
pub use converter::ConverterPlugin;
pub use encoding::Base64Plugin;
pub use hash::HashPlugin;
pub use identifier::UuidPlugin;
pub use timestamp::TimestampPlugin;

use std::sync::Arc;

use crate::error::Result;
use crate::plugin::Plugin;

/// Names of the built-in plugins in registration order
pub const BUILTIN_NAMES: [&str; 6] = [
    HashPlugin::NAME,
    Base64Plugin::NAME,
    UuidPlugin::NAME,
    TimestampPlugin::NAME,
    ConverterPlugin::NAME,
    CalculatorPlugin::NAME,
];

/// Construct every built-in plugin in registration order
pub fn builtins() -> Result<Vec<Arc<dyn Plugin>>> {
    Ok(vec![
        Arc::new(HashPlugin::new()?),
        Arc::new(Base64Plugin::new()?),
        Arc::new(UuidPlugin::new()?),
        Arc::new(TimestampPlugin::new()?),
        Arc::new(ConverterPlugin::new()?),
        Arc::new(CalculatorPlugin::new()?),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_match_documented_order() {
        let plugins = builtins().unwrap();
        let names: Vec<&str> = plugins.iter().map(|p| p.name()).collect();
        assert_eq!(names, BUILTIN_NAMES);
    }

    #[test]
    fn test_every_example_is_recognized_by_its_plugin() {
        for plugin in builtins().unwrap() {
            assert!(!plugin.examples().is_empty(), "{}", plugin.name());
            for example in plugin.examples() {
                assert!(plugin.can_handle(example), "{}: {example}", plugin.name());
            }
        }
    }
}
