use std::io::BufRead;

use kanal::AsyncSender;

/// Forward stdin lines to `tx` from a plain thread. Blocking reads cannot be
/// cancelled, so the thread is left to die with the process.
pub fn spawn_stdin_reader(tx: AsyncSender<String>) {
    let tx = tx.to_sync();

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
        tracing::debug!("stdin reader finished");
    });
}
