//! Synthetic capture builders shared by the integration tests
#![allow(dead_code)]

use types::{
    ApiHeader, ApiId, FixedName, GetFunction, LaunchFunction, LibraryDetail, LibraryRecord,
    Md5Digest, TypeTag,
};

pub fn header(tag: impl Into<TypeTag>, payload_words: u32, sequence: u32) -> ApiHeader {
    ApiHeader {
        type_tag: tag.into(),
        payload_words,
        handle: 0x0000_5555_0000_0000 | u64::from(sequence),
        sequence,
        duration: 100 + sequence,
        result: 0,
    }
}

/// Header followed by `payload`, zero padded to a whole number of words
pub fn message(tag: impl Into<TypeTag>, sequence: u32, payload: &[u8]) -> Vec<u8> {
    let mut body = payload.to_vec();
    body.resize(payload.len().div_ceil(4) * 4, 0);
    let mut bytes = header(tag, (body.len() / 4) as u32, sequence)
        .to_wire_bytes()
        .to_vec();
    bytes.extend_from_slice(&body);
    bytes
}

pub fn library(name: &[u8]) -> LibraryRecord {
    LibraryRecord {
        library_path: 0x0000_7FFC_0000_1000,
        library_addr: 0x0000_0001_0000_0000,
        size: 0x20_0000,
        detail: Some(LibraryDetail {
            name: FixedName::from_field(name),
            md5: Md5Digest([
                0xD4, 0x1D, 0x8C, 0xD9, 0x8F, 0x00, 0xB2, 0x04, 0xE9, 0x80, 0x09, 0x98, 0xEC,
                0xF8, 0x42, 0x7E,
            ]),
            cur_rec: 1,
        }),
    }
}

/// LOAD_LIB as the producer writes it: 27 words, record plus 4 pad bytes
pub fn load_lib(sequence: u32, name: &[u8]) -> Vec<u8> {
    let mut payload = library(name).to_wire_bytes();
    payload.extend_from_slice(&[0; 4]);
    message(ApiId::LoadLib, sequence, &payload)
}

pub fn unload_lib(sequence: u32, name: &[u8]) -> Vec<u8> {
    let mut payload = library(name).to_wire_bytes();
    payload.extend_from_slice(&[0; 4]);
    message(ApiId::UnloadLib, sequence, &payload)
}

pub fn get_function(sequence: u32, name: &[u8]) -> Vec<u8> {
    let record = GetFunction {
        core_id: 0,
        function_id: sequence as i32,
        md5: Md5Digest([0x42; 16]),
        name: FixedName::from_field(name),
    };
    message(ApiId::GetFunc, sequence, &record.to_wire_bytes())
}

pub fn launch_function(sequence: u32, declared_param_size: u32, params: &[u8]) -> Vec<u8> {
    let payload = LaunchFunction::encode_wire(sequence as i32, declared_param_size, params);
    message(ApiId::LaunchFunc, sequence, &payload)
}

pub fn concat(messages: &[Vec<u8>]) -> Vec<u8> {
    messages.concat()
}
