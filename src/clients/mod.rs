pub mod http;
pub mod registry_client;

pub use http::{HttpResponse, HttpTransport, ReqwestTransport};
pub use registry_client::RegistryClient;
