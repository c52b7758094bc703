mod octopus_client;

pub use octopus_client::OctopusClient;
