use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec};

lazy_static! {
    pub static ref GROUP_WRITES_COUNTER: CounterVec = register_counter_vec!(
        "usermanager_group_writes_total",
        "Group create/update/delete submissions by action and outcome",
        &["action", "status"]
    )
    .unwrap();
}

pub fn record_group_write(action: &str, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    GROUP_WRITES_COUNTER
        .with_label_values(&[action, status])
        .inc();
}
