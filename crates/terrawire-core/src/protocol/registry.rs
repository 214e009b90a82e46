//! Id -> constructor tables for packets and modules.
//!
//! Each table is declared once as a static slice next to its message enum and
//! indexed on first use. Lookups never mutate, so the registries can be shared
//! by any number of decoding threads without locking.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::OnceLock;

use bytes::Bytes;

use super::{Context, Module, Packet};
use crate::error::Result;
use crate::wire::Reader;

/// A message enum with a static table of concrete types.
pub trait Catalog: Sized + 'static {
    type Id: Copy + Eq + Hash + Ord + fmt::Debug + fmt::Display + Send + Sync;

    /// Every modeled type, keyed by the id it is registered under.
    fn entries() -> &'static [Entry<Self>];

    /// Fallback for ids absent from the table.
    fn unknown(id: Self::Id, data: Bytes) -> Self;
}

/// One registered message type.
pub struct Entry<M: Catalog> {
    pub id: M::Id,
    pub name: &'static str,
    pub(crate) construct: fn() -> M,
    pub(crate) decode: fn(&mut Reader<'_>, Context) -> Result<M>,
}

impl<M: Catalog> fmt::Debug for Entry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

/// What [`Registry::resolve`] hands back: a registered type, or the unknown
/// fallback for that id.
pub enum Constructor<M: Catalog> {
    Known(&'static Entry<M>),
    Unknown(M::Id),
}

impl<M: Catalog> Clone for Constructor<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: Catalog> Copy for Constructor<M> {}

impl<M: Catalog> fmt::Debug for Constructor<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constructor::Known(e) => write!(f, "Known({} = {})", e.name, e.id),
            Constructor::Unknown(id) => write!(f, "Unknown({id})"),
        }
    }
}

impl<M: Catalog> Constructor<M> {
    pub fn id(&self) -> M::Id {
        match self {
            Constructor::Known(e) => e.id,
            Constructor::Unknown(id) => *id,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Constructor::Known(_))
    }

    /// Default instance of the resolved type.
    pub fn construct(&self) -> M {
        match self {
            Constructor::Known(e) => (e.construct)(),
            Constructor::Unknown(id) => M::unknown(*id, Bytes::new()),
        }
    }

    /// Decode a body of the resolved type. The unknown fallback copies every
    /// remaining byte verbatim.
    pub fn decode(&self, r: &mut Reader<'_>, ctx: Context) -> Result<M> {
        match self {
            Constructor::Known(e) => (e.decode)(r, ctx),
            Constructor::Unknown(id) => {
                tracing::debug!(%id, len = r.remaining(), "unregistered id, keeping raw bytes");
                Ok(M::unknown(*id, Bytes::copy_from_slice(r.rest())))
            }
        }
    }
}

/// Read-only id lookup over a [`Catalog`].
pub struct Registry<M: Catalog> {
    by_id: HashMap<M::Id, &'static Entry<M>>,
}

impl<M: Catalog> Registry<M> {
    /// Index the static table. The first entry wins if an id repeats.
    pub fn build() -> Self {
        let mut by_id = HashMap::with_capacity(M::entries().len());
        for entry in M::entries() {
            by_id.entry(entry.id).or_insert(entry);
        }
        Self { by_id }
    }

    pub fn resolve(&self, id: M::Id) -> Constructor<M> {
        match self.by_id.get(&id) {
            Some(entry) => Constructor::Known(entry),
            None => Constructor::Unknown(id),
        }
    }

    pub fn contains(&self, id: M::Id) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Registered ids, ascending.
    pub fn ids(&self) -> Vec<M::Id> {
        let mut ids: Vec<_> = self.by_id.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

pub type PacketRegistry = Registry<Packet>;
pub type ModuleRegistry = Registry<Module>;

impl Registry<Packet> {
    /// Process-wide packet table, built on first use.
    pub fn global() -> &'static PacketRegistry {
        static PACKETS: OnceLock<PacketRegistry> = OnceLock::new();
        PACKETS.get_or_init(Registry::build)
    }
}

impl Registry<Module> {
    /// Process-wide module table, built on first use.
    pub fn global() -> &'static ModuleRegistry {
        static MODULES: OnceLock<ModuleRegistry> = OnceLock::new();
        MODULES.get_or_init(Registry::build)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use super::*;
    use crate::protocol::packets::ChestInfo;
    use crate::protocol::PacketBody;

    #[test]
    fn every_packet_id_constructs_its_own_type() {
        let reg = PacketRegistry::global();
        assert!(!reg.is_empty());
        for id in reg.ids() {
            let ctor = reg.resolve(id);
            assert!(ctor.is_known());
            assert_eq!(ctor.construct().id(), id, "packet table key {id}");
        }
    }

    #[test]
    fn every_module_id_constructs_its_own_type() {
        let reg = ModuleRegistry::global();
        assert!(!reg.is_empty());
        for id in reg.ids() {
            assert_eq!(reg.resolve(id).construct().id(), id, "module table key {id}");
        }
    }

    #[test]
    fn tables_have_no_duplicate_ids() {
        assert_eq!(PacketRegistry::global().len(), Packet::entries().len());
        assert_eq!(ModuleRegistry::global().len(), Module::entries().len());
    }

    #[test]
    fn absent_id_resolves_to_unknown() {
        let reg = PacketRegistry::global();
        assert!(!reg.contains(10));
        let ctor = reg.resolve(10);
        assert!(!ctor.is_known());
        assert_eq!(ctor.construct().id(), 10);

        let body = [1, 2, 3];
        let mut r = Reader::new(&body);
        match ctor.decode(&mut r, Context::Server).unwrap() {
            Packet::Unknown(p) => assert_eq!(&p.data[..], &body),
            other => panic!("unexpected {other:?}"),
        }
        assert!(r.is_empty());
    }

    #[test]
    fn known_id_decodes_concrete_type() {
        let reg = PacketRegistry::global();
        let body = [5, 0, 150, 0, 200, 0, 0];
        let packet = reg
            .resolve(ChestInfo::ID)
            .decode(&mut Reader::new(&body), Context::Client)
            .unwrap();
        assert!(matches!(packet, Packet::ChestInfo(ref c) if c.chest == 5));
    }
}
