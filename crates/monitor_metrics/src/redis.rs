//! Metrics exported by the Prometheus `redis_exporter`.

use crate::define_metrics;

define_metrics!(
    Redis => {
        MetricGauge { REDIS_UP, "redis_up", "Whether the Redis instance is reachable" },
        MetricGauge {
            REDIS_MEMORY_USED_BYTES,
            "redis_memory_used_bytes",
            "Total number of bytes allocated by Redis"
        },
        MetricGauge {
            REDIS_MEMORY_MAX_BYTES,
            "redis_memory_max_bytes",
            "The maxmemory configuration of the instance"
        },
        MetricGauge {
            REDIS_MEM_FRAGMENTATION_RATIO,
            "redis_mem_fragmentation_ratio",
            "Ratio between resident memory and memory allocated by Redis"
        },
        MetricGauge {
            REDIS_CONNECTED_CLIENTS,
            "redis_connected_clients",
            "Number of client connections, excluding replicas"
        },
        MetricGauge {
            REDIS_BLOCKED_CLIENTS,
            "redis_blocked_clients",
            "Number of clients pending on a blocking call"
        },
        MetricCounter {
            REDIS_COMMANDS_PROCESSED,
            "redis_commands_processed_total",
            "Total number of commands processed by the server"
        },
        MetricCounter {
            REDIS_NET_INPUT_BYTES,
            "redis_net_input_bytes_total",
            "Total bytes read from the network"
        },
        MetricCounter {
            REDIS_NET_OUTPUT_BYTES,
            "redis_net_output_bytes_total",
            "Total bytes written to the network"
        },
        MetricCounter {
            REDIS_COMMANDS_DURATION_SECONDS,
            "redis_commands_duration_seconds_total",
            "Total time spent executing commands"
        },
        MetricCounter {
            REDIS_TOTAL_ERROR_REPLIES,
            "redis_total_error_replies",
            "Total number of error replies sent to clients"
        },
    },
);
