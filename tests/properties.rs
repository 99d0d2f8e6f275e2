use std::fmt::Write as _;
use std::sync::Arc;

use http::{Method, Uri};
use proptest::prelude::*;
use stitch::{
    Handler, Middleware, Next, Request, ResponseWriter, Runner, SharedMiddleware, use_handler_fn,
    with,
};

/// Writes its index, then continues unless it is the stopping point.
struct Tag {
    index: usize,
    stop: bool,
}

impl Middleware for Tag {
    fn call(&self, w: &mut ResponseWriter, req: &Request, next: Next<'_>) {
        write!(w, "{},", self.index).unwrap();
        if !self.stop {
            next.run(w, req);
        }
    }
}

fn run(n: usize, stop_at: Option<usize>) -> String {
    let tags = (0..n).map(|index| {
        Arc::new(Tag { index, stop: Some(index) == stop_at }) as SharedMiddleware
    });
    let runner = Runner::build([
        with(tags),
        use_handler_fn(|w: &mut ResponseWriter, _: &Request| w.write_bytes(b"end")),
    ])
    .unwrap();

    let mut w = ResponseWriter::new();
    runner.call(&mut w, &Request::new(Method::GET, Uri::from_static("/")));
    w.body_string()
}

fn trail(upto: usize) -> String {
    (0..upto).map(|i| format!("{i},")).collect()
}

proptest! {
    #[test]
    fn every_middleware_runs_once_in_order(n in 0usize..16) {
        prop_assert_eq!(run(n, None), format!("{}end", trail(n)));
    }

    #[test]
    fn stopping_middleware_ends_the_walk((n, k) in (1usize..16).prop_flat_map(|n| (Just(n), 0..n))) {
        prop_assert_eq!(run(n, Some(k)), trail(k + 1));
    }

    #[test]
    fn snapshot_counts_every_append(batches in prop::collection::vec(0usize..5, 0..6)) {
        let setters = batches.iter().map(|&len| {
            with((0..len).map(|index| Arc::new(Tag { index, stop: false }) as SharedMiddleware))
        });
        let runner = Runner::build(setters).unwrap();

        prop_assert_eq!(runner.snapshot().middleware.len(), batches.iter().sum::<usize>());
    }
}
