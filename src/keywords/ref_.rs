//! `$ref`: open a resolution scope for the reference and recurse the
//! instance against the resolved document (SPEC_FULL.md §4.5).
use serde_json::Value;

use crate::eval::{eval_schema, Sink};
use crate::resolver::Context;

pub(crate) fn evaluate(ctx: &Context, reference: &str, instance: &Value, sink: &mut Sink) -> bool {
    match ctx.resolver.resolve_ref(ctx, reference) {
        Ok((child_ctx, target)) => eval_schema(&child_ctx, &target, instance, sink),
        Err(err) => {
            // Fatal for the whole validation run (SPEC_FULL.md §7); there
            // is no sensible per-instance violation to report. Record it
            // on the side channel and stop the walk; `Validator` checks
            // the channel once `eval_schema` has unwound.
            ctx.record_resolution_error(err);
            false
        }
    }
}
