//! `resolve` - run the result resolver without touching state

use anyhow::Result;
use lifecycle::StringValue;

use crate::cli::ResolveArgs;
use notnull::resource::resolve;

pub fn run(args: ResolveArgs) -> Result<()> {
    let primary = if args.unknown {
        StringValue::Unknown
    } else {
        StringValue::from(args.value)
    };
    let default = StringValue::from(args.default_value);

    log::debug!(
        "resolve: value = {primary}, default_value = {default}, prior = {:?}",
        args.prior
    );

    println!("{}", resolve(&primary, &default, args.prior.as_deref()));
    Ok(())
}
