//! Client storage.
//!
//! Clients are kept in insertion order. Capacity starts at three and grows
//! by exactly one slot whenever an add finds the store full; deleting a
//! client closes the gap but never shrinks capacity.

use crate::client::Client;
use crate::error::{AdvisorError, Result};
use log::debug;

/// Number of slots in a new store.
pub const INITIAL_CAPACITY: usize = 3;

/// Name-unique collection of clients.
///
/// The store itself never rejects a duplicate name. Callers check with
/// [`ClientStore::find`] before adding.
#[derive(Debug, Clone)]
pub struct ClientStore {
    clients: Vec<Client>,
    capacity: usize,
}

impl ClientStore {
    /// Creates an empty store with [`INITIAL_CAPACITY`] slots.
    pub fn new() -> Self {
        ClientStore {
            clients: Vec::with_capacity(INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
        }
    }

    /// Appends a client, growing the store by one slot if it is full.
    pub fn add(&mut self, client: Client) {
        if self.clients.len() >= self.capacity {
            self.grow();
        }
        debug!("Adding client {} to slot {}", client.name(), self.clients.len());
        self.clients.push(client);
    }

    fn grow(&mut self) {
        self.capacity += 1;
        self.clients.reserve_exact(1);
        debug!("Client store grown to {} slots", self.capacity);
    }

    /// Finds a client by case-insensitive name.
    pub fn find(&self, name: &str) -> Option<&Client> {
        let name = name.trim();
        self.clients
            .iter()
            .find(|client| same_name(client.name(), name))
    }

    /// Like [`ClientStore::find`], failing with
    /// [`AdvisorError::ClientNotFound`] when no client matches.
    pub fn get(&self, name: &str) -> Result<&Client> {
        self.find(name).ok_or_else(|| AdvisorError::ClientNotFound {
            name: name.trim().to_string(),
        })
    }

    /// Finds a client by case-insensitive name for modification.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Client> {
        let name = name.trim();
        self.clients
            .iter_mut()
            .find(|client| same_name(client.name(), name))
    }

    /// Removes the first client matching `name`, case-insensitively.
    ///
    /// Remaining clients keep their relative order. Returns `false` when no
    /// client matched.
    pub fn delete(&mut self, name: &str) -> bool {
        let name = name.trim();
        let position = self
            .clients
            .iter()
            .position(|client| same_name(client.name(), name));

        match position {
            Some(index) => {
                let removed = self.clients.remove(index);
                debug!("Deleted client {}", removed.name());
                true
            }
            None => false,
        }
    }

    /// Clients ordered by name, compared case-sensitively.
    ///
    /// The stored order is left untouched.
    pub fn sorted_view(&self) -> Vec<&Client> {
        let mut view: Vec<&Client> = self.clients.iter().collect();
        view.sort_by(|a, b| a.name().cmp(b.name()));
        view
    }

    /// Clients in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Client> {
        self.clients.iter()
    }

    pub fn count(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Number of slots, occupied or not.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ClientStore {
    fn default() -> Self {
        Self::new()
    }
}

fn same_name(stored: &str, wanted: &str) -> bool {
    stored.to_lowercase() == wanted.to_lowercase()
}
