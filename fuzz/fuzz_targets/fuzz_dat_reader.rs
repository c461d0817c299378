#![no_main]

use libfuzzer_sys::fuzz_target;
use strainview::config::SessionConfig;
use strainview::session::Session;
use strainview::dataset::Dataset;

fuzz_target!(|data: &[u8]| {
    // Parsing arbitrary bytes must fail gracefully, never panic
    let Ok(dataset) = Dataset::from_dat_reader(data) else {
        return;
    };

    // Whatever parsed must survive the whole pipeline
    let mut session = Session::new(SessionConfig::default());
    if session.load_dataset(dataset).is_err() {
        return;
    }
    let _ = session.compute_derived("shear");
    let _ = session.compute_derived("average");
    for name in session.list_channels() {
        session.add_channel(&name);
    }
    let _ = session.set_trimmed(true);
    let _ = session.project();
});
