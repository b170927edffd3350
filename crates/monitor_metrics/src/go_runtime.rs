//! Metrics exported by the Prometheus Go client runtime collector.

use crate::define_metrics;

define_metrics!(
    GoRuntime => {
        MetricGauge { GO_GOROUTINES, "go_goroutines", "Number of goroutines that currently exist" },
        MetricGauge { GO_THREADS, "go_threads", "Number of OS threads created" },
        MetricGauge {
            GO_MEMSTATS_HEAP_ALLOC_BYTES,
            "go_memstats_heap_alloc_bytes",
            "Heap bytes allocated and still in use"
        },
        MetricGauge {
            GO_MEMSTATS_HEAP_INUSE_BYTES,
            "go_memstats_heap_inuse_bytes",
            "Heap bytes in in-use spans"
        },
        MetricGauge {
            GO_MEMSTATS_HEAP_IDLE_BYTES,
            "go_memstats_heap_idle_bytes",
            "Heap bytes waiting to be used"
        },
        MetricSummary {
            GO_GC_DURATION_SECONDS,
            "go_gc_duration_seconds",
            "A summary of the pause duration of garbage collection cycles"
        },
    },
);
