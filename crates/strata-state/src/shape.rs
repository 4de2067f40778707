//! Shape validation: fail fast on reducers that break the contract.
//!
//! Run once at composition time, before any real action is dispatched.
//! Each reducer is probed twice with sentinel actions; the probes are the
//! only invocations, so probed reducers must be pure for the result to
//! mean anything (a caller obligation, not enforced here).

use crate::{Action, ReducerMap, StrataError, StrataResult};

/// Probe every reducer in the map for contract compliance.
///
/// For each `(key, reducer)` pair in insertion order:
///
/// 1. `reduce(None, init)` returning `None` is fatal: the reducer cannot
///    initialize its slice, so composition aborts with
///    [`StrataError::Shape`].
/// 2. `reduce(None, <randomized unknown kind>)` returning `None` is a
///    latent bug (the reducer does not ignore unknown actions) but not
///    fatal; it is reported through the diagnostic log and composition
///    continues.
pub(crate) fn assert_reducer_shape(reducers: &ReducerMap) -> StrataResult<()> {
    for (key, reducer) in reducers.iter() {
        if reducer.reduce(None, &Action::init()).is_none() {
            return Err(StrataError::shape(key));
        }

        if reducer.reduce(None, &Action::probe_unknown()).is_none() {
            tracing::warn!(
                key = %key,
                "reducer returned no state when probed with an unrecognized action; \
                 it must return its input slice unchanged for actions it does not handle, \
                 or composed state will silently corrupt"
            );
        }
    }
    Ok(())
}
