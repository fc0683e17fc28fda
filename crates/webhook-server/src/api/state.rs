use mount_rewriter::MutationHandler;

pub(crate) struct ApiServerState {
    pub(crate) handler: MutationHandler,
}
