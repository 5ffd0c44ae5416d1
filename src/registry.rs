//! Publish and tear down the Motorknob attribute namespace.
//!
//! Publishing is all-or-nothing. Every successful step is pushed onto an undo
//! list together with the information needed to reverse it; if a later step
//! fails, the list is unwound newest-first and the host is left exactly as
//! it was found.
//!
//! Teardown is the unconditional counterpart: it removes every attribute in
//! table order whether or not it exists, then releases `profile`, then the
//! root. Calling it twice, or after a failed publish, is harmless.

use heapless::Vec;

use crate::attributes::{Attribute, Parent, ATTRIBUTES, ATTRIBUTE_COUNT, PROFILE_NAME};
use crate::error::KnobError;
use crate::host::AttributeHost;

/// Root container, `profile`, and one entry per attribute.
const UNDO_CAPACITY: usize = 2 + ATTRIBUTE_COUNT;

/// Lifecycle of a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryState {
    /// Nothing published yet, or the last publish was rolled back.
    Uninitialized,
    /// Every attribute is visible.
    Published,
    /// Attributes removed and containers released.
    TornDown,
}

/// One acquired resource, carrying what its inverse needs.
enum Acquired<C> {
    Container(C),
    File(C, &'static Attribute),
}

/// Owner of the published containers and attributes for one device.
pub struct Registry<H: AttributeHost> {
    root_name: &'static str,
    root: Option<H::Container>,
    profile: Option<H::Container>,
    published: Vec<&'static Attribute, ATTRIBUTE_COUNT>,
    state: RegistryState,
}

impl<H: AttributeHost> Registry<H> {
    /// Create an empty registry whose top-level container will be `root_name`.
    pub fn new(root_name: &'static str) -> Self {
        Self {
            root_name,
            root: None,
            profile: None,
            published: Vec::new(),
            state: RegistryState::Uninitialized,
        }
    }

    pub fn state(&self) -> RegistryState {
        self.state
    }

    pub fn is_published(&self) -> bool {
        self.state == RegistryState::Published
    }

    /// Attributes currently published by this registry, in publish order.
    pub fn published(&self) -> impl Iterator<Item = &'static Attribute> + '_ {
        self.published.iter().copied()
    }

    /// Create the containers and register every attribute.
    ///
    /// Must run at most once per attach.
    ///
    /// # Errors
    /// * [`KnobError::ResourceExhausted`] if any container or attribute could
    ///   not be created; everything created by this call has been removed
    ///   again by the time it returns
    pub fn publish<E>(&mut self, host: &mut H) -> Result<(), KnobError<E>> {
        let mut undo: Vec<Acquired<H::Container>, UNDO_CAPACITY> = Vec::new();

        match self.acquire_all(host, &mut undo) {
            Ok((root, profile)) => {
                self.root = Some(root);
                self.profile = Some(profile);
                self.published.clear();
                for attribute in ATTRIBUTES {
                    // Sized to hold the whole table.
                    let _ = self.published.push(attribute);
                }
                self.state = RegistryState::Published;
                info!("Created {}/*", self.root_name);
                Ok(())
            }
            Err(failed) => {
                error!("Error creating {} under {}", failed, self.root_name);
                Self::unwind(host, undo);
                self.state = RegistryState::Uninitialized;
                Err(KnobError::ResourceExhausted)
            }
        }
    }

    /// Run every acquisition in order, recording each success in `undo`.
    ///
    /// On failure returns the name of the entry that could not be created.
    fn acquire_all(
        &self,
        host: &mut H,
        undo: &mut Vec<Acquired<H::Container>, UNDO_CAPACITY>,
    ) -> Result<(H::Container, H::Container), &'static str> {
        let root = host
            .create_container(self.root_name, None)
            .map_err(|_| self.root_name)?;
        // `undo` is sized for every step, so pushes cannot fail.
        let _ = undo.push(Acquired::Container(root));

        let profile = host
            .create_container(PROFILE_NAME, Some(root))
            .map_err(|_| PROFILE_NAME)?;
        let _ = undo.push(Acquired::Container(profile));

        for attribute in ATTRIBUTES {
            let container = match attribute.parent {
                Parent::Root => root,
                Parent::Profile => profile,
            };
            host.create_file(container, attribute)
                .map_err(|_| attribute.name)?;
            let _ = undo.push(Acquired::File(container, attribute));
        }

        Ok((root, profile))
    }

    /// Reverse every recorded acquisition, newest first.
    fn unwind(host: &mut H, mut undo: Vec<Acquired<H::Container>, UNDO_CAPACITY>) {
        while let Some(step) = undo.pop() {
            match step {
                Acquired::File(container, attribute) => host.remove_file(container, attribute),
                Acquired::Container(container) => host.release_container(container),
            }
        }
    }

    /// Remove every attribute and release both containers.
    ///
    /// Never fails and may be called any number of times.
    pub fn teardown(&mut self, host: &mut H) {
        info!("Deleting {} entries", self.root_name);

        for attribute in ATTRIBUTES {
            let container = match attribute.parent {
                Parent::Root => self.root,
                Parent::Profile => self.profile,
            };
            if let Some(container) = container {
                host.remove_file(container, attribute);
            }
        }

        if let Some(profile) = self.profile.take() {
            host.release_container(profile);
        }
        if let Some(root) = self.root.take() {
            host.release_container(root);
        }

        self.published.clear();
        self.state = RegistryState::TornDown;
    }
}
