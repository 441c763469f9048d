use std::io;

// Client-side hooks consulted while building a request package. Each hook
// receives the target service and method names; all but the argument encoder
// also receive the full argument list of the call.
//
// Every trait is implemented for plain closures with the matching signature,
// so most callers never implement them by hand. Closure parameters need
// explicit `&str` / `&[A]` annotations to satisfy the higher-ranked bounds.

/// Serializes the single argument of a call into the package data.
pub trait ArgumentEncoder<A> {
    fn encode(&self, service_name: &str, method_name: &str, arg: &A) -> Result<Vec<u8>, io::Error>;
}

/// Produces the log id of a call when the call context does not force one.
pub trait LogIdGenerator<A> {
    fn generate(&self, service_name: &str, method_name: &str, args: &[A]) -> i64;
}

/// Produces the attachment sent alongside the data, if any.
pub trait ClientAttachmentHandler<A> {
    fn handle_request(&self, service_name: &str, method_name: &str, args: &[A])
    -> Option<Vec<u8>>;
}

/// Produces opaque credentials for the endpoint to check, if any.
pub trait AuthenticationDataHandler<A> {
    fn create(&self, service_name: &str, method_name: &str, args: &[A]) -> Option<Vec<u8>>;
}

impl<A, F> ArgumentEncoder<A> for F
where
    F: Fn(&str, &str, &A) -> Result<Vec<u8>, io::Error>,
{
    fn encode(&self, service_name: &str, method_name: &str, arg: &A) -> Result<Vec<u8>, io::Error> {
        self(service_name, method_name, arg)
    }
}

impl<A, F> LogIdGenerator<A> for F
where
    F: Fn(&str, &str, &[A]) -> i64,
{
    fn generate(&self, service_name: &str, method_name: &str, args: &[A]) -> i64 {
        self(service_name, method_name, args)
    }
}

impl<A, F> ClientAttachmentHandler<A> for F
where
    F: Fn(&str, &str, &[A]) -> Option<Vec<u8>>,
{
    fn handle_request(
        &self,
        service_name: &str,
        method_name: &str,
        args: &[A],
    ) -> Option<Vec<u8>> {
        self(service_name, method_name, args)
    }
}

impl<A, F> AuthenticationDataHandler<A> for F
where
    F: Fn(&str, &str, &[A]) -> Option<Vec<u8>>,
{
    fn create(&self, service_name: &str, method_name: &str, args: &[A]) -> Option<Vec<u8>> {
        self(service_name, method_name, args)
    }
}
