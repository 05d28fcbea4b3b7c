//! Macros for declarative automaton construction.

/// Build an automaton from a declarative description.
///
/// Expands to [`AutomatonBuilder`](crate::builder::AutomatonBuilder) calls
/// and evaluates to `Result<Automaton, AutomatonError>`.
///
/// # Example
///
/// ```
/// use nfa_lab::automaton;
///
/// let automaton = automaton! {
///     states: [Even, Odd]
///     initial: Even
///     final: [Even]
///     transitions: [
///         Even -> Odd : "flip",
///         Odd -> Even : "flip",
///         Even -> Even : "stay",
///     ]
/// }
/// .unwrap();
///
/// assert!(automaton.verify(&["flip", "flip", "stay"]).unwrap().accepted);
/// assert!(!automaton.verify(&["flip"]).unwrap().accepted);
/// ```
#[macro_export]
macro_rules! automaton {
    (
        states: [$($state:ident),* $(,)?]
        $(initial: $initial:ident)?
        $(final: [$($final:ident),* $(,)?])?
        $(transitions: [$($from:ident -> $to:ident : $label:literal),* $(,)?])?
    ) => {{
        $crate::builder::AutomatonBuilder::new()
            $(.state(stringify!($state)))*
            $(.initial(stringify!($initial)))?
            $($(.final_state(stringify!($final)))*)?
            $($(.transition(stringify!($from), stringify!($to), $label))*)?
            .build()
    }};
}
