mod bind_tcp_listener_on_random_port;
pub use bind_tcp_listener_on_random_port::bind_tcp_listener_on_random_port;
mod tcp_listener_to_host_port;
pub use tcp_listener_to_host_port::tcp_listener_to_host_port;
