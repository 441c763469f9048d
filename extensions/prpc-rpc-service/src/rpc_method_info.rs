use crate::{
    ArgumentEncoder, AuthenticationDataHandler, CallContext, ClientAttachmentHandler,
    LogIdGenerator,
};
use prpc::{
    constants::{DEFAULT_CHUNK_SIZE, MAGIC_CODE},
    meta::CompressType,
    package::RpcDataPackage,
};
use std::io;

/// Everything the client knows about one remote method.
///
/// `A` is the call argument type. Optional hooks are attached with the
/// `with_*` methods.
pub struct RpcMethodInfo<A> {
    service_name: String,
    method_name: String,
    compress_type: CompressType,
    chunk_size: usize,
    argument_encoder: Box<dyn ArgumentEncoder<A> + Send + Sync>,
    log_id_generator: Option<Box<dyn LogIdGenerator<A> + Send + Sync>>,
    attachment_handler: Option<Box<dyn ClientAttachmentHandler<A> + Send + Sync>>,
    authentication_data_handler: Option<Box<dyn AuthenticationDataHandler<A> + Send + Sync>>,
}

impl<A> RpcMethodInfo<A> {
    pub fn new<E>(
        service_name: impl Into<String>,
        method_name: impl Into<String>,
        argument_encoder: E,
    ) -> Self
    where
        E: ArgumentEncoder<A> + Send + Sync + 'static,
    {
        Self {
            service_name: service_name.into(),
            method_name: method_name.into(),
            compress_type: CompressType::NoCompress,
            chunk_size: DEFAULT_CHUNK_SIZE,
            argument_encoder: Box::new(argument_encoder),
            log_id_generator: None,
            attachment_handler: None,
            authentication_data_handler: None,
        }
    }

    /// Compression tag declared for this method. Only the tag is sent; the
    /// encoder is expected to have compressed accordingly.
    pub fn with_compress_type(mut self, compress_type: CompressType) -> Self {
        self.compress_type = compress_type;
        self
    }

    /// Largest data size sent in one package by `build_request_chunks`.
    /// `0` disables chunking.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_log_id_generator<G>(mut self, log_id_generator: G) -> Self
    where
        G: LogIdGenerator<A> + Send + Sync + 'static,
    {
        self.log_id_generator = Some(Box::new(log_id_generator));
        self
    }

    pub fn with_attachment_handler<H>(mut self, attachment_handler: H) -> Self
    where
        H: ClientAttachmentHandler<A> + Send + Sync + 'static,
    {
        self.attachment_handler = Some(Box::new(attachment_handler));
        self
    }

    pub fn with_authentication_data_handler<H>(mut self, authentication_data_handler: H) -> Self
    where
        H: AuthenticationDataHandler<A> + Send + Sync + 'static,
    {
        self.authentication_data_handler = Some(Box::new(authentication_data_handler));
        self
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn compress_type(&self) -> CompressType {
        self.compress_type
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Builds the request package for a call with `args`.
    ///
    /// Only a single-argument call carries data: the argument is run through
    /// the argument encoder. The log id comes from `ctx` if it has one, else
    /// from the log id generator if configured, else stays `0`. Attachment
    /// and authentication data are added when their handler is configured
    /// and returns `Some`.
    ///
    /// Errors from the argument encoder are returned unchanged.
    pub fn build_request(&self, args: &[A], ctx: &CallContext) -> Result<RpcDataPackage, io::Error> {
        let service_name = self.service_name.as_str();
        let method_name = self.method_name.as_str();

        let mut builder = RpcDataPackage::builder()
            .magic_code(MAGIC_CODE)
            .service_name(service_name)
            .method_name(method_name)
            .compress_type(self.compress_type);

        if let [arg] = args {
            let data = self
                .argument_encoder
                .encode(service_name, method_name, arg)?;
            builder = builder.data(data);
        }

        if let Some(log_id) = ctx.log_id() {
            tracing::info!(
                log_id,
                "Call context carries a log id, using it for {}.{}",
                service_name,
                method_name
            );
            builder = builder.log_id(log_id);
        } else if let Some(log_id_generator) = &self.log_id_generator {
            builder = builder.log_id(log_id_generator.generate(service_name, method_name, args));
        }

        if let Some(attachment_handler) = &self.attachment_handler {
            if let Some(attachment) =
                attachment_handler.handle_request(service_name, method_name, args)
            {
                builder = builder.attachment(attachment);
            }
        }

        if let Some(authentication_data_handler) = &self.authentication_data_handler {
            if let Some(authentication_data) =
                authentication_data_handler.create(service_name, method_name, args)
            {
                builder = builder.authentication_data(authentication_data);
            }
        }

        Ok(builder.build())
    }

    /// Builds the request and splits it by the method's chunk size, ready to
    /// be encoded and sent in order.
    pub fn build_request_chunks(
        &self,
        args: &[A],
        ctx: &CallContext,
    ) -> Result<Vec<RpcDataPackage>, io::Error> {
        Ok(self.build_request(args, ctx)?.split(self.chunk_size))
    }
}
