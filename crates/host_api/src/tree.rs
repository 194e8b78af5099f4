//! Live display tree capability.

/// Trait defining the display tree interface consumed by the patch applier.
///
/// Implementations own the live tree; the engine only holds `NodeRef`
/// handles while applying a patch batch and never stores them across
/// frames. Addresses are resolved positionally through [`HostTree::child`],
/// so child ordering must be stable between mutations.
///
/// Mutation methods take the affected nodes by reference; freshly created
/// nodes are handed over by value when attached.
pub trait HostTree {
    /// Opaque handle to a live node. Cheap to clone.
    type NodeRef: Clone;

    /// The root element the engine manages (e.g. `<body>`).
    ///
    /// The root must have a parent so it can itself be replaced.
    fn root(&self) -> Self::NodeRef;

    /// Create a detached element node with the given tag.
    fn create_element(&mut self, tag: &str) -> Self::NodeRef;

    /// Create a detached text node.
    fn create_text(&mut self, text: &str) -> Self::NodeRef;

    /// Create a detached node from pre-formatted markup.
    ///
    /// The markup is opaque to the engine; hosts may parse it or store
    /// it verbatim.
    fn create_fragment(&mut self, markup: &str) -> Self::NodeRef;

    /// Set (or overwrite) an attribute on an element node.
    fn set_attribute(&mut self, node: &Self::NodeRef, key: &str, value: &str);

    /// Remove an attribute from an element node. Missing keys are a no-op.
    fn remove_attribute(&mut self, node: &Self::NodeRef, key: &str);

    /// Attach `child` as the new last child of `parent`.
    fn append_child(&mut self, parent: &Self::NodeRef, child: Self::NodeRef);

    /// Detach `child` (and its subtree) from `parent`.
    fn remove_child(&mut self, parent: &Self::NodeRef, child: &Self::NodeRef);

    /// Detach `old` from `parent` and attach `new` in its place.
    fn replace_child(&mut self, parent: &Self::NodeRef, old: &Self::NodeRef, new: Self::NodeRef);

    /// The `index`-th child of `node`, if it exists.
    fn child(&self, node: &Self::NodeRef, index: usize) -> Option<Self::NodeRef>;

    /// Number of children of `node`. Leaves report zero.
    fn child_count(&self, node: &Self::NodeRef) -> usize;

    /// The parent of `node`, if attached.
    fn parent(&self, node: &Self::NodeRef) -> Option<Self::NodeRef>;
}
