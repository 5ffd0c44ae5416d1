//! Attribute host framework.
//!
//! [`AttributeHost`] is the seam between the registry and whatever actually
//! exposes endpoints to host processes. [`AttributeTree`] is a fixed-capacity,
//! in-memory implementation: containers and files live in `heapless` vectors,
//! so running out of room is how creation fails.

use heapless::Vec;

use crate::attributes::Attribute;

/// A framework that can publish containers and attribute files.
///
/// Removal and release are infallible and must treat absent entries as a
/// no-op; teardown relies on that.
pub trait AttributeHost {
    /// Handle to a published container.
    type Container: Copy;
    /// Error reported when a container or file cannot be created.
    type Error: core::fmt::Debug;

    fn create_container(
        &mut self,
        name: &'static str,
        parent: Option<Self::Container>,
    ) -> Result<Self::Container, Self::Error>;

    fn release_container(&mut self, container: Self::Container);

    fn create_file(
        &mut self,
        container: Self::Container,
        attribute: &'static Attribute,
    ) -> Result<(), Self::Error>;

    fn remove_file(&mut self, container: Self::Container, attribute: &'static Attribute);

    /// Resolve a `/`-separated path to a visible attribute.
    fn lookup(&self, path: &str) -> Option<&'static Attribute>;
}

/// Why an [`AttributeTree`] refused to create an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostError {
    /// No free slot left.
    Full,
    /// An entry with that name already exists in the same container.
    Exists,
    /// The parent container is not published.
    NoParent,
}

/// Handle to a container in an [`AttributeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ContainerId(u16);

struct ContainerEntry {
    id: ContainerId,
    name: &'static str,
    parent: Option<ContainerId>,
}

struct FileEntry {
    container: ContainerId,
    attribute: &'static Attribute,
}

/// In-memory attribute namespace holding up to `C` containers and `F` files.
pub struct AttributeTree<const C: usize, const F: usize> {
    containers: Vec<ContainerEntry, C>,
    files: Vec<FileEntry, F>,
    next_id: u16,
}

/// Tree sized exactly for one Motorknob (root, profile, four attributes).
pub type KnobTree = AttributeTree<2, 4>;

impl<const C: usize, const F: usize> Default for AttributeTree<C, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const C: usize, const F: usize> AttributeTree<C, F> {
    pub const fn new() -> Self {
        Self {
            containers: Vec::new(),
            files: Vec::new(),
            next_id: 0,
        }
    }

    /// Number of published containers.
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Number of published attribute files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing at all is published.
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty() && self.files.is_empty()
    }

    /// Whether `path` resolves to a visible attribute.
    pub fn contains(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    fn container(&self, id: ContainerId) -> Option<&ContainerEntry> {
        self.containers.iter().find(|c| c.id == id)
    }

    fn child(&self, parent: Option<ContainerId>, name: &str) -> Option<&ContainerEntry> {
        self.containers
            .iter()
            .find(|c| c.parent == parent && c.name == name)
    }
}

impl<const C: usize, const F: usize> AttributeHost for AttributeTree<C, F> {
    type Container = ContainerId;
    type Error = HostError;

    fn create_container(
        &mut self,
        name: &'static str,
        parent: Option<ContainerId>,
    ) -> Result<ContainerId, HostError> {
        if let Some(parent) = parent {
            if self.container(parent).is_none() {
                return Err(HostError::NoParent);
            }
        }
        if self.child(parent, name).is_some() {
            return Err(HostError::Exists);
        }

        let id = ContainerId(self.next_id);
        self.containers
            .push(ContainerEntry { id, name, parent })
            .map_err(|_| HostError::Full)?;
        self.next_id = self.next_id.wrapping_add(1);
        Ok(id)
    }

    fn release_container(&mut self, container: ContainerId) {
        // Files cannot outlive the directory they sit in.
        self.files.retain(|f| f.container != container);
        self.containers.retain(|c| c.id != container);
    }

    fn create_file(
        &mut self,
        container: ContainerId,
        attribute: &'static Attribute,
    ) -> Result<(), HostError> {
        if self.container(container).is_none() {
            return Err(HostError::NoParent);
        }
        if self
            .files
            .iter()
            .any(|f| f.container == container && f.attribute.name == attribute.name)
        {
            return Err(HostError::Exists);
        }

        self.files
            .push(FileEntry { container, attribute })
            .map_err(|_| HostError::Full)
    }

    fn remove_file(&mut self, container: ContainerId, attribute: &'static Attribute) {
        self.files
            .retain(|f| !(f.container == container && f.attribute.name == attribute.name));
    }

    fn lookup(&self, path: &str) -> Option<&'static Attribute> {
        let (dirs, file) = path.trim_matches('/').rsplit_once('/')?;

        let mut parent = None;
        for name in dirs.split('/') {
            parent = Some(self.child(parent, name)?.id);
        }
        let container = parent?;

        self.files
            .iter()
            .find(|f| f.container == container && f.attribute.name == file)
            .map(|f| f.attribute)
    }
}
