/*!
 * heapscope demo driver
 *
 * Replays a synthetic interpreter-style workload through the profiler on
 * the native heap and prints the session report. Useful as a smoke check
 * and as a reference for wiring the hook into a host runtime.
 */

use std::error::Error;

use heapscope::{Category, Profiler, RawCall, SessionConfig};
use log::info;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // A heap-resident probe stands in for the host state pointer the plugin
    // glue would normally hand us as the low end of the address range.
    let probe = Box::new(0u8);
    let base_address = &*probe as *const u8 as usize;

    let mut profiler = Profiler::native();
    profiler.start(SessionConfig::new(base_address), None)?;
    info!("replaying synthetic workload");

    // Interpreter-ish mix: many small strings and tables, a few bigger
    // userdata buffers, with churn.
    let mut live: Vec<(usize, usize)> = Vec::new();
    for i in 0..512usize {
        let category = Category::ALL[i % Category::COUNT];
        let size = 16 + (i % 13) * 24;
        if let Some(address) = profiler.handle(RawCall::allocate(category, size))? {
            live.push((address, size));
        }

        // Grow every third table-ish block, mimicking rehash churn.
        if i % 3 == 0 && !live.is_empty() {
            let (address, size) = live.swap_remove(i % live.len());
            let grown = size * 2;
            if let Some(moved) = profiler.handle(RawCall::reallocate(address, size, grown))? {
                live.push((moved, grown));
            }
        }

        // Drop roughly half of what accumulates.
        if i % 2 == 1 {
            let (address, size) = live.swap_remove((i * 7) % live.len());
            profiler.handle(RawCall::free(address, size))?;
        }
    }

    for (address, size) in live.drain(..) {
        profiler.handle(RawCall::free(address, size))?;
    }

    // Prints the report to stdout.
    let _report = profiler.stop()?;
    Ok(())
}
