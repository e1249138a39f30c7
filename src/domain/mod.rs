pub mod oids;
pub mod pkcs7;
