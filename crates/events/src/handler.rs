use bloomdesk_core::Aggregate;

/// Execute an aggregate command deterministically (no IO, no async).
///
/// 1. **Decide**: `aggregate.handle(command)` produces events without mutating.
/// 2. **Evolve**: each event is applied in order.
///
/// If `handle` fails nothing is applied, so a rejected command leaves the
/// aggregate exactly as it was.
pub fn execute<A>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Error>
where
    A: Aggregate,
{
    let events = A::handle(aggregate, command)?;
    for ev in &events {
        A::apply(aggregate, ev);
    }
    Ok(events)
}
