//! Metrics exported by the Prometheus `mysqld_exporter`.

use crate::define_metrics;

define_metrics!(
    Mysql => {
        MetricGauge { MYSQL_UP, "mysql_up", "Whether the last scrape of the MySQL server succeeded" },
        MetricGauge {
            MYSQL_THREADS_CONNECTED,
            "mysql_global_status_threads_connected",
            "Number of currently open connections"
        },
        MetricGauge {
            MYSQL_THREADS_RUNNING,
            "mysql_global_status_threads_running",
            "Number of threads that are not sleeping"
        },
        MetricGauge {
            MYSQL_THREADS_CACHED,
            "mysql_global_status_threads_cached",
            "Number of threads in the thread cache"
        },
        MetricGauge {
            MYSQL_MAX_CONNECTIONS,
            "mysql_global_variables_max_connections",
            "Maximum permitted number of simultaneous client connections"
        },
        MetricCounter {
            MYSQL_CONNECTION_ERRORS,
            "mysql_global_status_connection_errors_total",
            "Connection errors, labeled by error kind"
        },
        MetricGauge {
            MYSQL_BUFFER_POOL_PAGES,
            "mysql_global_status_buffer_pool_pages",
            "InnoDB buffer pool pages, labeled by page state"
        },
        MetricGauge {
            MYSQL_INNODB_PAGE_SIZE,
            "mysql_global_variables_innodb_page_size",
            "InnoDB page size in bytes"
        },
        MetricCounter {
            MYSQL_INNODB_DATA_READS,
            "mysql_global_status_innodb_data_reads",
            "Total number of InnoDB data reads"
        },
        MetricCounter {
            MYSQL_INNODB_DATA_WRITES,
            "mysql_global_status_innodb_data_writes",
            "Total number of InnoDB data writes"
        },
        MetricCounter {
            MYSQL_SLOW_QUERIES,
            "mysql_global_status_slow_queries",
            "Number of queries that took longer than long_query_time"
        },
        MetricCounter {
            MYSQL_COMMANDS,
            "mysql_global_status_commands_total",
            "Number of executed statements, labeled by command"
        },
        MetricCounter {
            MYSQL_BUFFER_POOL_READ_REQUESTS,
            "mysql_global_status_buffer_pool_read_requests",
            "Logical read requests served by the InnoDB buffer pool"
        },
        MetricCounter {
            MYSQL_BUFFER_POOL_READS,
            "mysql_global_status_buffer_pool_reads",
            "Logical reads the buffer pool could not satisfy and read from disk"
        },
        MetricCounter {
            MYSQL_ABORTED_CONNECTS,
            "mysql_global_status_aborted_connects",
            "Failed attempts to connect to the MySQL server"
        },
        MetricCounter {
            MYSQL_ABORTED_CLIENTS,
            "mysql_global_status_aborted_clients",
            "Connections aborted because the client died without closing properly"
        },
    },
);

pub const LABEL_NAME_BUFFER_POOL_STATE: &str = "state";
pub const LABEL_NAME_COMMAND: &str = "command";
pub const LABEL_NAME_ERROR: &str = "error";
