#![no_main]

use libfuzzer_sys::fuzz_target;
use tang_model::{ConnectivityResult, JsonModel, ServerResponse, StandardFormats, Validate};

fuzz_target!(|data: &[u8]| {
    let seed = ConnectivityResult::new()
        .with_succeeded(true)
        .with_server_responses(vec![Some(ServerResponse::new().with_tang_url("http://tang1"))]);
    let mut target = seed.clone();

    match target.replace_from_json(data) {
        Ok(()) => {
            let _ = target.validate(&StandardFormats::new());
            let bytes = target.to_json_bytes().expect("decoded records always encode");
            let again = ConnectivityResult::from_json_bytes(&bytes).expect("re-decode");
            assert_eq!(again, target);
        }
        Err(_) => assert_eq!(target, seed),
    }
});
