//! Header State Handle
//!
//! Owns the `NavigationMachine` for one mounted header and mirrors its view
//! into a signal. All events go through [`NavHandle::dispatch`].

use careerhub::nav::{NavEvent, NavView, NavigationMachine};
use leptos::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dom;

/// Cloneable handle shared by the header's event handlers
#[derive(Clone)]
pub struct NavHandle {
    machine: Rc<RefCell<NavigationMachine>>,
    view: RwSignal<NavView>,
    navigate: Rc<dyn Fn(&str)>,
}

impl NavHandle {
    pub fn new(machine: NavigationMachine, navigate: Rc<dyn Fn(&str)>) -> Self {
        let view = create_rw_signal(machine.view());
        Self {
            machine: Rc::new(RefCell::new(machine)),
            view,
            navigate,
        }
    }

    /// Read-only view for rendering
    pub fn view(&self) -> ReadSignal<NavView> {
        self.view.read_only()
    }

    /// Feed one event to the machine, publish the new view, then run effects.
    ///
    /// The machine borrow ends before effects run: a navigation effect can
    /// synchronously re-enter with `RouteChanged`.
    pub fn dispatch(&self, event: NavEvent) {
        let effects = self.machine.borrow_mut().dispatch(event);
        let next = self.machine.borrow().view();

        if self.view.with_untracked(|current| current != &next) {
            self.view.set(next);
        }

        for effect in &effects {
            dom::run_effect(effect, &*self.navigate);
        }
    }

    /// Close the menu without touching signals, for use during unmount
    pub fn release(&self) {
        if let Ok(mut machine) = self.machine.try_borrow_mut() {
            machine.close();
        }
    }
}

/// Tags session fetches so only the newest reply is applied
#[derive(Clone, Default)]
pub struct SessionRequests {
    latest: Rc<Cell<u64>>,
}

impl SessionRequests {
    /// Start a fetch and return its ticket
    pub fn begin(&self) -> u64 {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        ticket
    }

    /// Whether no fetch was started after `ticket`
    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }
}
