//! The form-control contract between a selector and its host form.
//!
//! A selector holds exactly one callback slot per direction, defaulting
//! to a no-op and replaced on registration. The host pushes values in
//! with `write_value`; the selector notifies out through the registered
//! change callback on completed user-driven changes, and fires the
//! touched callback once, on the first user-driven change.

/// When the change callback runs relative to the state transition.
///
/// `Immediate` is the default: state settles, then the callback runs
/// synchronously. `Deferred` parks the emission until the host calls
/// `flush_emission`, for host environments that must avoid reentrant
/// updates inside their own event dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmitTiming {
    #[default]
    Immediate,
    Deferred,
}

pub type ChangeFn<E> = Box<dyn FnMut(Option<E>)>;
pub type TouchedFn = Box<dyn FnMut()>;

/// Data binding between a selector and its host form.
pub struct HostBinding<E> {
    on_change: ChangeFn<E>,
    on_touched: TouchedFn,
    touched: bool,
    timing: EmitTiming,
    pending: Option<Option<E>>,
}

impl<E> HostBinding<E> {
    pub fn new(timing: EmitTiming) -> Self {
        Self {
            on_change: Box::new(|_| {}),
            on_touched: Box::new(|| {}),
            touched: false,
            timing,
            pending: None,
        }
    }

    pub fn register_on_change(&mut self, callback: ChangeFn<E>) {
        self.on_change = callback;
    }

    pub fn register_on_touched(&mut self, callback: TouchedFn) {
        self.on_touched = callback;
    }

    /// Fire the touched notification, at most once per binding.
    pub fn touch(&mut self) {
        if !self.touched {
            self.touched = true;
            (self.on_touched)();
        }
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Notify the host of a new external value, per the configured
    /// timing. Deferred emissions keep only the latest value.
    pub fn emit(&mut self, value: Option<E>) {
        match self.timing {
            EmitTiming::Immediate => (self.on_change)(value),
            EmitTiming::Deferred => self.pending = Some(value),
        }
    }

    /// Deliver a parked deferred emission, if any.
    pub fn flush(&mut self) {
        if let Some(value) = self.pending.take() {
            (self.on_change)(value);
        }
    }
}

impl<E> Default for HostBinding<E> {
    fn default() -> Self {
        Self::new(EmitTiming::default())
    }
}

impl<E> std::fmt::Debug for HostBinding<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostBinding")
            .field("touched", &self.touched)
            .field("timing", &self.timing)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

/// The operations a host form drives a selector through.
pub trait FormControl {
    /// Value shape the host writes into the control.
    type Write;
    /// Value shape the control emits back to the host.
    type Emit;

    /// Host -> control. `None` clears the selection. Applies even while
    /// the control is disabled; never emits and never touches.
    fn write_value(&mut self, value: Option<Self::Write>);

    /// Register the control -> host change callback (single slot).
    fn register_on_change(&mut self, callback: ChangeFn<Self::Emit>);

    /// Register the touched callback, fired once on the first
    /// user-driven change.
    fn register_on_touched(&mut self, callback: TouchedFn);

    /// Freeze or unfreeze user-driven transitions. Disabling does not
    /// clear existing selections.
    fn set_disabled(&mut self, disabled: bool);
}

#[cfg(test)]
mod tests {
    use super::{EmitTiming, HostBinding};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn touch_fires_once() {
        let count = Rc::new(RefCell::new(0));
        let mut binding: HostBinding<i32> = HostBinding::default();
        let seen = Rc::clone(&count);
        binding.register_on_touched(Box::new(move || *seen.borrow_mut() += 1));
        binding.touch();
        binding.touch();
        assert_eq!(*count.borrow(), 1);
        assert!(binding.is_touched());
    }

    #[test]
    fn deferred_emission_keeps_latest_until_flushed() {
        let seen: Rc<RefCell<Vec<Option<i32>>>> = Rc::new(RefCell::new(Vec::new()));
        let mut binding: HostBinding<i32> = HostBinding::new(EmitTiming::Deferred);
        let sink = Rc::clone(&seen);
        binding.register_on_change(Box::new(move |v| sink.borrow_mut().push(v)));

        binding.emit(Some(1));
        binding.emit(Some(2));
        assert!(seen.borrow().is_empty());

        binding.flush();
        assert_eq!(*seen.borrow(), vec![Some(2)]);

        binding.flush();
        assert_eq!(seen.borrow().len(), 1);
    }
}
