mod fake_octopus_client;

pub use fake_octopus_client::FakeOctopusClient;
