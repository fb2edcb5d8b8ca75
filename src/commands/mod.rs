/*!
Command handlers for the CLI

- `serve`   runs the HTTP API
- `ask`     answers one question and prints the result
- `catalog` searches ERDDAP catalogs and lists servers

Handlers receive a loaded, validated configuration.
*/

pub mod ask;
pub mod catalog;
pub mod serve;

pub use ask::run_ask;
pub use catalog::{run_search, run_servers};
pub use serve::run_serve;
