/// Development utilities module
///
/// Fixture-backed data provider used by `--mock` mode and by tests.

pub mod mock_client;

pub use mock_client::MockClient;
