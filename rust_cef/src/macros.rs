/// Calls a slot of a runtime-owned struct wrapper, passing the struct itself
/// as the first argument. Evaluates to `None` when the runtime left the slot
/// empty. Must be expanded inside an `unsafe` block.
macro_rules! invoke_v_table {
    ($this:expr => $method:ident ( $($arg:expr),* $(,)? )) => {{
        let this = $this;
        match this.0.$method {
            Some(method) => Some(method(this.as_raw() $(, $arg)*)),
            None => None,
        }
    }};
}
