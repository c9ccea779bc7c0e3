//! The per-project context threaded through every operation (§9 "Mutable
//! global container"): the wrapper cache, manipulation settings, and a
//! handle to the filesystem host. Modeled as an explicit value rather than
//! process-wide state — tests create independent containers, and two
//! containers never share a cache.

use std::cell::RefCell;
use std::rc::Rc;

use crate::factory::Factory;
use crate::fs_host::FileSystemHost;
use crate::settings::ManipulationSettings;

pub struct GlobalContainer {
    pub(crate) factory: RefCell<Factory>,
    pub(crate) settings: RefCell<ManipulationSettings>,
    pub(crate) fs_host: Rc<dyn FileSystemHost>,
}

impl GlobalContainer {
    #[must_use]
    pub fn new(settings: ManipulationSettings, fs_host: Rc<dyn FileSystemHost>) -> Rc<Self> {
        Rc::new(GlobalContainer {
            factory: RefCell::new(Factory::new()),
            settings: RefCell::new(settings),
            fs_host,
        })
    }

    #[must_use]
    pub fn settings(&self) -> ManipulationSettings {
        self.settings.borrow().clone()
    }

    pub fn set_settings(&self, settings: ManipulationSettings) {
        *self.settings.borrow_mut() = settings;
    }

    #[must_use]
    pub fn fs_host(&self) -> Rc<dyn FileSystemHost> {
        self.fs_host.clone()
    }
}
