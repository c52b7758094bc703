pub mod octopus_client_http;

pub use octopus_client_http::HttpOctopusClient;
