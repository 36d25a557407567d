mod alipay;

pub use alipay::UpstreamProvider;
