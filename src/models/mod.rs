/*!
Data structures for the BGP and BMP messages produced by the decoder.

- [network]: address families, AS numbers and network prefixes
- [bgp]: BGP UPDATE/NOTIFICATION messages, path attributes and error codes
*/
pub mod bgp;
pub mod network;

pub use bgp::*;
pub use network::*;
